//! Plain-text dumps of segment lists and token streams.
//!
//! One item per line: the line number, a label and the escaped source
//! bytes. Merged operators also show their canonical spelling.

use std::fmt::Write as _;

use crate::token::{Segment, SegmentKind, Token, TokenKind};

/// Render segments as `LINE KIND text` lines.
#[must_use]
pub fn render_segments(src: &[u8], segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let label = match segment.kind {
            SegmentKind::Raw => "RAW",
            SegmentKind::Code => "CODE",
        };
        let _ = writeln!(
            out,
            "{:>4} {label:<4} {}",
            segment.start_line,
            segment.text_in(src).escape_ascii()
        );
    }
    out
}

/// Render tokens as `LINE KIND text` lines.
#[must_use]
pub fn render_tokens(src: &[u8], tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let text = token.text_in(src).escape_ascii();
        let label = kind_label(token.kind);
        // String bodies exclude their delimiters.
        let _ = if token.kind.is_string() {
            writeln!(out, "{:>4} {label:<24} \"{text}\"", token.line)
        } else {
            writeln!(out, "{:>4} {label:<24} {text}", token.line)
        };
    }
    out
}

fn kind_label(kind: TokenKind) -> String {
    match kind {
        TokenKind::Operator(op) => format!("Operator `{}`", op.spelling()),
        TokenKind::OperatorWord(op) => format!("OperatorWord `{}`", op.spelling()),
        other => format!("{other:?}"),
    }
}
