//! Bounds-checked forward cursor over an immutable byte buffer.
//!
//! Every read goes through `slice::get`, so no scanner built on top of
//! the cursor can index past the end of attacker-controlled input.
//! Reaching the end is reported as `None`, never as a panic.

/// Forward cursor tracking the current byte offset and line number.
///
/// The cursor is `Copy`: scanners take a snapshot before a speculative
/// match and restore it on a soft failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteCursor<'a> {
    src: &'a [u8],
    pos: usize,
    line: u32,
}

impl<'a> ByteCursor<'a> {
    /// Cursor at the start of `src`, with `line` as the current line.
    #[must_use]
    pub const fn new(src: &'a [u8], line: u32) -> Self {
        Self { src, pos: 0, line }
    }

    /// Cursor over `src[..end]`, starting at `start`. Offsets stay
    /// relative to `src`, so spans taken from a sub-range are still
    /// valid in the whole buffer.
    #[must_use]
    pub fn with_range(src: &'a [u8], start: usize, end: usize, line: u32) -> Self {
        let end = end.min(src.len());
        Self {
            src: src.get(..end).unwrap_or_default(),
            pos: start.min(end),
            line,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub const fn source(&self) -> &'a [u8] {
        self.src
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.src.len().saturating_sub(self.pos)
    }

    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    #[must_use]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.get(self.pos.checked_add(n)?).copied()
    }

    /// Consumes one byte, counting a newline.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
        }
        Some(byte)
    }

    /// Consumes up to `n` bytes, counting the newlines skipped over.
    pub fn advance_by(&mut self, n: usize) {
        let end = self.pos.saturating_add(n).min(self.src.len());
        let skipped = self.src.get(self.pos..end).unwrap_or_default();
        let newlines = memchr::memchr_iter(b'\n', skipped).count();
        self.line = self
            .line
            .saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX));
        self.pos = end;
    }

    /// Consumes `byte` if it is next.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.advance();
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn starts_with(&self, bytes: &[u8]) -> bool {
        self.rest().starts_with(bytes)
    }

    /// Bytes from `start` up to the current position.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        self.src.get(start..self.pos).unwrap_or_default()
    }

    /// Bytes not consumed yet.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        self.src.get(self.pos..).unwrap_or_default()
    }

    /// Consumes bytes while `pred` holds.
    pub fn skip_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
        while let Some(byte) = self.peek() {
            if !pred(byte) {
                break;
            }
            self.advance();
        }
    }

    /// Skips spaces, tabs and carriage returns, stopping at a newline.
    pub fn skip_horizontal_space(&mut self) {
        self.skip_while(is_horizontal_space);
    }

    /// Moves to the next `\n` without consuming it (or to the end).
    pub fn skip_to_line_end(&mut self) {
        let skip = memchr::memchr(b'\n', self.rest()).unwrap_or_else(|| self.remaining());
        // Nothing skipped here is a newline, so the line stays put.
        self.pos += skip;
    }
}

/// Horizontal whitespace: anything a line may end with before `\n`.
#[must_use]
pub const fn is_horizontal_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | 0x0B | 0x0C)
}

/// Script-level whitespace, newline included.
#[must_use]
pub const fn is_space(byte: u8) -> bool {
    byte == b'\n' || is_horizontal_space(byte)
}

/// Identifier byte outside the multi-byte range.
#[must_use]
pub const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// First byte of a UTF-8 multi-byte sequence, as far as the lexer cares.
#[must_use]
pub const fn is_utf8_lead(byte: u8) -> bool {
    byte >= 0xC0
}

/// Continuation byte (`10xxxxxx`).
#[must_use]
pub const fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}
