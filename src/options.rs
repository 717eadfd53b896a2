use crate::cursor::{is_utf8_lead, is_word_byte};

/// What happens when input ends inside a string, comment or heredoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// The construct ends at the end of input, as legacy scripts expect.
    #[default]
    Lenient,
    /// The construct is reported as unterminated.
    Strict,
}

/// Which bytes may form a heredoc/nowdoc delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterRule {
    /// Letters, digits, `_` and UTF-8 sequences anywhere, so
    /// `<<<1EOT` and `<<<ÉTÉ` are accepted.
    #[default]
    Relaxed,
    /// A letter, `_` or UTF-8 sequence first, then the relaxed set.
    Standard,
}

impl DelimiterRule {
    #[must_use]
    pub const fn is_lead_byte(self, byte: u8) -> bool {
        match self {
            Self::Relaxed => is_word_byte(byte) || is_utf8_lead(byte),
            Self::Standard => byte.is_ascii_alphabetic() || byte == b'_' || is_utf8_lead(byte),
        }
    }

    /// Byte allowed after the first one. UTF-8 continuation bytes are
    /// consumed together with their lead byte.
    #[must_use]
    pub const fn is_delimiter_byte(self, byte: u8) -> bool {
        is_word_byte(byte) || is_utf8_lead(byte)
    }
}

/// Lexer configuration.
///
/// ```
/// use scriptlex::{EofPolicy, LexOptions};
///
/// let options = LexOptions::new().with_start_line(40).strict();
/// assert_eq!(options.eof, EofPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexOptions {
    /// Line number of the first input byte. Sources that are a slice of
    /// a larger file (an `eval()`-ed fragment) start past line 1.
    pub start_line: u32,
    pub eof: EofPolicy,
    pub delimiters: DelimiterRule,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            start_line: 1,
            eof: EofPolicy::Lenient,
            delimiters: DelimiterRule::Relaxed,
        }
    }
}

impl LexOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_start_line(mut self, line: u32) -> Self {
        self.start_line = line;
        self
    }

    #[must_use]
    pub const fn with_eof(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    #[must_use]
    pub const fn with_delimiters(mut self, rule: DelimiterRule) -> Self {
        self.delimiters = rule;
        self
    }

    /// Shorthand for [`EofPolicy::Strict`].
    #[must_use]
    pub const fn strict(self) -> Self {
        self.with_eof(EofPolicy::Strict)
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self.eof, EofPolicy::Strict)
    }
}
