use crate::lexer::{LexError, Lexer};
use crate::options::LexOptions;
use crate::splitter;
use crate::token::{Segment, SegmentKind, Token};

/// A lexed piece of a template document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Literal text, emitted verbatim as program output.
    Raw(Segment),
    Code { segment: Segment, tokens: Vec<Token> },
}

impl Block {
    #[must_use]
    pub const fn segment(&self) -> &Segment {
        match self {
            Self::Raw(segment) | Self::Code { segment, .. } => segment,
        }
    }
}

/// Split a document and tokenize every CODE block. Token spans and
/// lines refer to the whole document.
///
/// # Errors
///
/// Returns the first `LexError` of any CODE block; lexing stops there.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn lex_document(input: &[u8], options: &LexOptions) -> Result<Vec<Block>, LexError> {
    splitter::split_with(input, options)
        .into_iter()
        .map(|segment| match segment.kind {
            SegmentKind::Raw => Ok(Block::Raw(segment)),
            SegmentKind::Code => {
                let tokens = Lexer::for_segment(input, &segment, options).collect_tokens()?;
                Ok(Block::Code { segment, tokens })
            }
        })
        .collect()
}
