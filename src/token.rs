use crate::keywords::KeywordId;
use crate::operator::OperatorId;

/// Borrowed byte range inside the original input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSpan {
    pub start: usize,
    pub len: usize,
}

impl ByteSpan {
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Span from `start` up to (excluding) `end`. An inverted range
    /// collapses to an empty span at `start`.
    #[must_use]
    pub const fn between(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Smallest span covering both `a` and `b`.
    #[must_use]
    pub fn cover(a: Self, b: Self) -> Self {
        let start = a.start.min(b.start);
        let end = a.end().max(b.end());
        Self::between(start, end)
    }

    /// Bytes of this span in `src`, or an empty slice when the span
    /// does not belong to `src`.
    #[must_use]
    pub fn slice<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        src.get(self.start..self.end()).unwrap_or_default()
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain name (`foo`, `$x` yields `Dollar` then `Identifier`).
    Identifier,
    /// Reserved word.
    Keyword(KeywordId),
    /// Alphabetic operator such as `and` or `instanceof`.
    OperatorWord(OperatorId),
    Integer,
    Real,
    /// `'...'`, text is the raw body.
    SingleQuotedString,
    /// `"..."`, text is the raw body.
    DoubleQuotedString,
    /// `` `...` ``, text is the raw body.
    BacktickString,
    /// `<<<ID` body.
    Heredoc,
    /// `<<<'ID'` body.
    Nowdoc,
    /// Symbolic operator, including merged casts like `(int)`.
    Operator(OperatorId),
    Dollar,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    Colon,
    /// `\`
    NamespaceSep,
    /// `=>`
    ArrayArrow,
    /// Symbol run no operator accepted.
    Other,
}

impl TokenKind {
    /// True for the literal kinds whose text excludes the delimiters.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::SingleQuotedString
                | Self::DoubleQuotedString
                | Self::BacktickString
                | Self::Heredoc
                | Self::Nowdoc
        )
    }

    /// True when a token of this kind can end an operand, which turns
    /// a following `+`, `-`, `&` or `[` into its binary/postfix form.
    #[must_use]
    pub const fn ends_operand(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Integer
                | Self::Real
                | Self::SingleQuotedString
                | Self::DoubleQuotedString
                | Self::BacktickString
                | Self::Heredoc
                | Self::Nowdoc
                | Self::CloseParen
                | Self::CloseBracket
        )
    }
}

/// Resolved keyword/operator attached at lex time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenPayload {
    Keyword(KeywordId),
    Operator(OperatorId),
}

/// A single token: kind, borrowed text span and the 1-based line of
/// its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: ByteSpan,
    pub line: u32,
    pub payload: Option<TokenPayload>,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, text: ByteSpan, line: u32) -> Self {
        Self {
            kind,
            text,
            line,
            payload: None,
        }
    }

    #[must_use]
    pub const fn with_payload(mut self, payload: TokenPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub fn text_in<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        self.text.slice(src)
    }

    /// Operator this token resolved to, if any.
    #[must_use]
    pub const fn operator(&self) -> Option<OperatorId> {
        match self.payload {
            Some(TokenPayload::Operator(op)) => Some(op),
            _ => None,
        }
    }
}

/// Whether a segment is literal template text or a script block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Raw,
    Code,
}

/// One piece of a split document.
///
/// `span` is the full extent of the segment, open/close tags and the
/// whitespace around the code included, so the spans of all segments
/// tile the input. `text` is the content: the literal bytes of a RAW
/// segment, or the script of a CODE segment without tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub span: ByteSpan,
    pub text: ByteSpan,
    pub start_line: u32,
}

impl Segment {
    #[must_use]
    pub const fn is_code(&self) -> bool {
        matches!(self.kind, SegmentKind::Code)
    }

    #[must_use]
    pub fn text_in<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        self.text.slice(src)
    }
}
