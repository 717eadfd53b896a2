#![allow(dead_code)]

use scriptlex::{Token, TokenKind, tokenize};

pub fn lex(src: &str) -> Vec<Token> {
    tokenize(src.as_bytes()).expect("tokenize failed")
}

pub fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).iter().map(|t| t.kind).collect()
}

/// Source text of each token, lossily decoded for readable asserts.
pub fn texts(src: &str) -> Vec<String> {
    lex(src)
        .iter()
        .map(|t| String::from_utf8_lossy(t.text_in(src.as_bytes())).into_owned())
        .collect()
}

/// Content of each segment, tagged with its kind.
pub fn segment_texts(doc: &str) -> Vec<(scriptlex::SegmentKind, String)> {
    scriptlex::split(doc.as_bytes())
        .iter()
        .map(|s| {
            (
                s.kind,
                String::from_utf8_lossy(s.text_in(doc.as_bytes())).into_owned(),
            )
        })
        .collect()
}
