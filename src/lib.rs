//! Lexical front end for an embeddable, PHP-like scripting engine.
//!
//! Two layers:
//!
//! - the [splitter](split) cuts a template document into literal RAW
//!   text and CODE blocks delimited by `<?php ... ?>`;
//! - the [lexer](tokenize) turns a script into typed tokens that borrow
//!   byte spans of the input.
//!
//! # Quick start
//!
//! ## Tokenize a script
//!
//! ```
//! use scriptlex::{OperatorId, TokenKind, tokenize};
//!
//! let src = b"$total = (int) $price * 2;";
//! let tokens = tokenize(src).unwrap();
//! assert_eq!(tokens[3].kind, TokenKind::Operator(OperatorId::CastInt));
//! assert_eq!(tokens[3].text_in(src), b"(int)");
//! ```
//!
//! ## Lex a template document
//!
//! ```
//! use scriptlex::{Block, LexOptions, lex_document};
//!
//! let doc = b"<h1><?php echo $title; ?></h1>";
//! let blocks = lex_document(doc, &LexOptions::default()).unwrap();
//! assert_eq!(blocks.len(), 3);
//! assert!(matches!(&blocks[1], Block::Code { tokens, .. } if tokens.len() == 4));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cursor;
pub mod document;
mod heredoc;
pub mod keywords;
pub mod lexer;
pub mod operator;
pub mod options;
pub mod render;
pub mod splitter;
pub mod token;

pub use cursor::ByteCursor;
pub use document::{Block, lex_document};
pub use keywords::{KeywordId, WordKind};
pub use lexer::{LexError, LexErrorKind, Lexer, Step, tokenize, tokenize_with};
pub use operator::{OperatorId, OperatorMatcher, StandardOperators};
pub use options::{DelimiterRule, EofPolicy, LexOptions};
pub use render::{render_segments, render_tokens};
pub use splitter::{split, split_with};
pub use token::{ByteSpan, Segment, SegmentKind, Token, TokenKind, TokenPayload};
