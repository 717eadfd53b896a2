//! Heredoc and nowdoc bodies.
//!
//! Both forms open with `<<<`, an optional quote, a delimiter and a
//! newline:
//!
//! ```text
//! <<<EOT          <<<'EOT'
//! body $x         body $x
//! EOT;            EOT
//! ```
//!
//! The body ends at the first line that starts with the delimiter and
//! carries nothing after it but whitespace and an optional `;`.

use tracing::debug;

use crate::cursor::{ByteCursor, is_horizontal_space, is_utf8_continuation, is_utf8_lead};
use crate::lexer::{LexError, LexErrorKind};
use crate::options::{DelimiterRule, LexOptions};
use crate::token::{ByteSpan, Token, TokenKind};

/// A recognized `<<<DELIM` opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener {
    pub delimiter: ByteSpan,
    pub nowdoc: bool,
}

/// Why an opener was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenerError {
    /// Nothing after `<<<` looks like a delimiter.
    NotHeredoc,
    /// A quote or a delimiter was read but the opener is incomplete.
    Malformed,
}

/// Reads the opener with the cursor right after `<<<`, leaving the
/// cursor at the first body byte.
pub fn read_opener(
    cursor: &mut ByteCursor<'_>,
    rule: DelimiterRule,
) -> Result<Opener, OpenerError> {
    cursor.skip_horizontal_space();

    let quote = match cursor.peek() {
        Some(q @ (b'\'' | b'"')) => {
            cursor.advance();
            Some(q)
        }
        _ => None,
    };

    let start = cursor.offset();
    read_delimiter(cursor, rule);
    let delimiter = ByteSpan::between(start, cursor.offset());
    if delimiter.is_empty() {
        return Err(if quote.is_some() {
            OpenerError::Malformed
        } else {
            OpenerError::NotHeredoc
        });
    }

    // A missing closing quote is tolerated.
    if let Some(q) = quote {
        cursor.eat(q);
    }

    cursor.skip_horizontal_space();
    if !cursor.eat(b'\n') {
        return Err(OpenerError::Malformed);
    }

    Ok(Opener {
        delimiter,
        nowdoc: quote == Some(b'\''),
    })
}

/// Consumes a maximal delimiter run.
fn read_delimiter(cursor: &mut ByteCursor<'_>, rule: DelimiterRule) {
    let mut first = true;
    while let Some(byte) = cursor.peek() {
        let accepted = if first {
            rule.is_lead_byte(byte)
        } else {
            rule.is_delimiter_byte(byte)
        };
        if !accepted {
            break;
        }
        first = false;
        cursor.advance();
        if is_utf8_lead(byte) {
            cursor.skip_while(is_utf8_continuation);
        }
    }
}

/// If `line` closes a heredoc, returns how many bytes to consume so the
/// cursor lands on the trailing `;`, the line's `\n`, or the end.
fn closing_length(line: &[u8], delimiter: &[u8]) -> Option<usize> {
    let after = line.strip_prefix(delimiter)?;
    let ws = after.iter().take_while(|&&b| is_horizontal_space(b)).count();
    let tail = after.get(ws..).unwrap_or_default();
    let accepted = match tail.first() {
        None | Some(b'\n') => true,
        Some(b';') => {
            let rest = tail.get(1..).unwrap_or_default();
            let ws = rest.iter().take_while(|&&b| is_horizontal_space(b)).count();
            matches!(rest.get(ws), None | Some(b'\n'))
        }
        _ => false,
    };
    accepted.then_some(delimiter.len() + ws)
}

/// True when `line` starts with `delimiter` and the delimiter is not
/// the prefix of a longer word.
pub fn starts_with_delimiter(line: &[u8], delimiter: &[u8], rule: DelimiterRule) -> bool {
    match line.strip_prefix(delimiter) {
        Some(after) => after
            .first()
            .is_none_or(|&b| !rule.is_delimiter_byte(b) && !is_utf8_continuation(b)),
        None => false,
    }
}

/// Scans a heredoc/nowdoc with the cursor right after `<<<`.
///
/// Returns `Ok(None)` with the cursor untouched when the bytes do not
/// form an opener, so the caller can lex `<<<` as operators.
pub fn scan(
    cursor: &mut ByteCursor<'_>,
    options: &LexOptions,
    open: usize,
    line: u32,
) -> Result<Option<Token>, LexError> {
    let snapshot = *cursor;
    let opener = match read_opener(cursor, options.delimiters) {
        Ok(opener) => opener,
        Err(OpenerError::Malformed) if options.is_strict() => {
            return Err(LexError::new(
                LexErrorKind::InvalidHeredocDelimiter,
                open,
                line,
            ));
        }
        Err(reason) => {
            debug!(offset = open, ?reason, "`<<<` is not a heredoc opener");
            *cursor = snapshot;
            return Ok(None);
        }
    };

    let src = cursor.source();
    let delimiter = opener.delimiter.slice(src);
    let body_start = cursor.offset();
    let kind = if opener.nowdoc {
        TokenKind::Nowdoc
    } else {
        TokenKind::Heredoc
    };

    loop {
        let line_start = cursor.offset();
        if let Some(len) = closing_length(cursor.rest(), delimiter) {
            // The body stops at the newline ending the previous line.
            let body_end = line_start.saturating_sub(1).max(body_start);
            cursor.advance_by(len);
            return Ok(Some(body_token(src, kind, body_start, body_end, line)));
        }
        cursor.skip_to_line_end();
        if !cursor.eat(b'\n') {
            break;
        }
    }

    if options.is_strict() {
        return Err(LexError::new(LexErrorKind::UnterminatedString, open, line));
    }
    Ok(Some(body_token(src, kind, body_start, cursor.offset(), line)))
}

fn body_token(src: &[u8], kind: TokenKind, start: usize, end: usize, line: u32) -> Token {
    let body = ByteSpan::between(start, end).slice(src);
    let trimmed = body.trim_ascii_end().len();
    Token::new(kind, ByteSpan::new(start, trimmed), line)
}
