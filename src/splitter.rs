//! Splits a template document into RAW text and CODE blocks.
//!
//! A CODE block opens with `<?` (optionally `<?php`, any case) and
//! closes with `?>`. A `?>` inside a comment, a quoted string or a
//! heredoc/nowdoc body does not close the block.

use memchr::memmem;
use tracing::{debug, trace};

use crate::cursor::{ByteCursor, is_space};
use crate::heredoc;
use crate::lexer::{skip_block_comment, skip_quoted};
use crate::options::{DelimiterRule, LexOptions};
use crate::token::{ByteSpan, Segment, SegmentKind};

/// Split `input` with default options.
#[must_use]
pub fn split(input: &[u8]) -> Vec<Segment> {
    split_with(input, &LexOptions::default())
}

/// Split `input` into an ordered list of segments whose spans tile it.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
#[must_use]
pub fn split_with(input: &[u8], options: &LexOptions) -> Vec<Segment> {
    let mut cursor = ByteCursor::new(input, options.start_line);
    let mut segments = Vec::new();

    while !cursor.is_eof() {
        let raw_start = cursor.offset();
        let raw_line = cursor.line();
        let open = memmem::find(cursor.rest(), b"<?").map(|at| raw_start + at);
        let raw_end = open.unwrap_or(input.len());

        if raw_end > raw_start {
            let span = ByteSpan::between(raw_start, raw_end);
            segments.push(Segment {
                kind: SegmentKind::Raw,
                span,
                text: span,
                start_line: raw_line,
            });
        }
        cursor.advance_by(raw_end - raw_start);
        if open.is_none() {
            break;
        }

        segments.push(code_block(&mut cursor, options.delimiters));
    }

    debug!(segments = segments.len(), "split document");
    segments
}

/// Reads one CODE block with the cursor on its `<?`.
fn code_block(cursor: &mut ByteCursor<'_>, rule: DelimiterRule) -> Segment {
    let tag_start = cursor.offset();
    cursor.advance_by(2);
    if cursor
        .rest()
        .get(..3)
        .is_some_and(|tag| tag.eq_ignore_ascii_case(b"php"))
    {
        cursor.advance_by(3);
    }
    cursor.skip_while(is_space);

    let start = cursor.offset();
    let start_line = cursor.line();
    let end = find_close_tag(cursor, rule);
    let content = ByteSpan::between(start, end).slice(cursor.source());
    let text = ByteSpan::new(start, content.trim_ascii_end().len());

    trace!(start, end, "code block");
    Segment {
        kind: SegmentKind::Code,
        span: ByteSpan::between(tag_start, cursor.offset()),
        text,
        start_line,
    }
}

/// Advances past the `?>` ending the block and returns its offset, or
/// the end of input when there is none.
fn find_close_tag(cursor: &mut ByteCursor<'_>, rule: DelimiterRule) -> usize {
    loop {
        let at = cursor.offset();
        let Some(byte) = cursor.peek() else {
            return at;
        };
        match byte {
            b'?' if cursor.peek_at(1) == Some(b'>') => {
                cursor.advance_by(2);
                return at;
            }
            b'#' => cursor.skip_to_line_end(),
            b'/' if cursor.peek_at(1) == Some(b'/') => cursor.skip_to_line_end(),
            b'/' if cursor.peek_at(1) == Some(b'*') => {
                cursor.advance_by(2);
                skip_block_comment(cursor);
            }
            b'\'' | b'"' | b'`' => {
                cursor.advance();
                skip_quoted(cursor, byte);
            }
            b'<' if cursor.starts_with(b"<<<") => {
                cursor.advance_by(3);
                skip_heredoc(cursor, rule);
            }
            _ => {
                cursor.advance();
            }
        }
    }
}

/// With the cursor after `<<<`, skips a heredoc body up to its closing
/// delimiter line. Bytes that do not form an opener are left for the
/// block scan.
fn skip_heredoc(cursor: &mut ByteCursor<'_>, rule: DelimiterRule) {
    let snapshot = *cursor;
    let Ok(opener) = heredoc::read_opener(cursor, rule) else {
        *cursor = snapshot;
        return;
    };
    let delimiter = opener.delimiter.slice(cursor.source());

    loop {
        if heredoc::starts_with_delimiter(cursor.rest(), delimiter, rule) {
            cursor.advance_by(delimiter.len());
            return;
        }
        cursor.skip_to_line_end();
        if !cursor.eat(b'\n') {
            return;
        }
    }
}
