use std::fmt;

use tracing::{debug, trace};

use crate::cursor::{ByteCursor, is_space, is_utf8_continuation, is_utf8_lead, is_word_byte};
use crate::heredoc;
use crate::keywords::{self, WordKind};
use crate::operator::{OperatorId, OperatorMatcher, StandardOperators};
use crate::options::LexOptions;
use crate::token::{ByteSpan, Segment, Token, TokenKind, TokenPayload};

/// Classifies a lexer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Quoted string or heredoc body never closed.
    UnterminatedString,
    /// `/*` comment never closed.
    UnterminatedComment,
    /// `<<<` opener with a quote or delimiter but no valid line end.
    InvalidHeredocDelimiter,
    /// Normal end of input. Not a failure: it is how
    /// [`Lexer::next_step`] reports that no tokens are left.
    Eof,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnterminatedComment => write!(f, "unterminated comment"),
            Self::InvalidHeredocDelimiter => {
                write!(f, "invalid heredoc delimiter")
            }
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the construct that failed.
    pub offset: usize,
    pub line: u32,
}

impl LexError {
    #[must_use]
    pub const fn new(kind: LexErrorKind, offset: usize, line: u32) -> Self {
        Self { kind, offset, line }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, LexErrorKind::Eof)
    }
}

/// One unit of lexer output.
///
/// Casts are recognized only when their closing `)` arrives, after `(`
/// and the type keyword were already handed out, so the lexer asks the
/// caller to replace them instead of editing the caller's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Emit(Token),
    /// Drop the last `count` tokens, then push `token`.
    ReplaceLast { count: usize, token: Token },
}

impl Step {
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Emit(token) | Self::ReplaceLast { token, .. } => token,
        }
    }

    /// Applies this step to a token list.
    pub fn apply(self, tokens: &mut Vec<Token>) {
        match self {
            Self::Emit(token) => tokens.push(token),
            Self::ReplaceLast { count, token } => {
                tokens.truncate(tokens.len().saturating_sub(count));
                tokens.push(token);
            }
        }
    }
}

/// Tokenize a script with default options.
///
/// # Errors
///
/// Default options are lenient and never fail. With
/// [`EofPolicy::Strict`](crate::EofPolicy::Strict) unterminated strings,
/// comments and heredocs, and malformed heredoc openers, are errors.
pub fn tokenize(src: &[u8]) -> Result<Vec<Token>, LexError> {
    tokenize_with(src, &LexOptions::default())
}

/// Tokenize a script.
#[tracing::instrument(level = "debug", skip_all, fields(len = src.len()))]
pub fn tokenize_with(src: &[u8], options: &LexOptions) -> Result<Vec<Token>, LexError> {
    Lexer::new(src, options).collect_tokens()
}

/// Multi-byte operator spellings, longest first.
const SYMBOLS: &[&[u8]] = &[
    b"===", b"!==", b"<<=", b">>=", b"==", b"!=", b"<>", b"<=", b">=", b"<<", b">>", b"=>", b"->",
    b"&&", b"||", b"++", b"--", b"+=", b"-=", b"*=", b"/=", b"%=", b"^=", b".=", b"&=", b"|=",
];

/// Length of the operator candidate at the start of `rest`.
fn assemble(rest: &[u8]) -> usize {
    match rest.first() {
        Some(b'=' | b'!' | b'&' | b'|' | b'+' | b'-' | b'*' | b'/' | b'%' | b'^' | b'.' | b'<'
        | b'>') => SYMBOLS
            .iter()
            .find(|sym| rest.starts_with(sym))
            .map_or(1, |sym| sym.len()),
        _ => 1,
    }
}

/// Consumes a quoted body with the cursor right after the opening
/// quote. Returns the offset of the closing quote, or `None` when the
/// input ends first.
///
/// A backslash always takes the next byte with it, so a quote ends the
/// body exactly when an even number of backslashes precede it. Inside
/// double quotes, `{$` opens an interpolation region that nests on
/// braces and may hold quotes of its own.
pub(crate) fn skip_quoted(cursor: &mut ByteCursor<'_>, quote: u8) -> Option<usize> {
    loop {
        let at = cursor.offset();
        match cursor.advance()? {
            b'\\' => {
                cursor.advance();
            }
            b'{' if quote == b'"' && cursor.peek() == Some(b'$') => {
                skip_interpolation(cursor)?;
            }
            byte if byte == quote => return Some(at),
            _ => {}
        }
    }
}

fn skip_interpolation(cursor: &mut ByteCursor<'_>) -> Option<()> {
    let mut depth = 1usize;
    while depth > 0 {
        match cursor.advance()? {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            quote @ (b'\'' | b'"') => {
                skip_literal(cursor, quote)?;
            }
            _ => {}
        }
    }
    Some(())
}

/// Like [`skip_quoted`] without interpolation, so nesting stays bounded.
fn skip_literal(cursor: &mut ByteCursor<'_>, quote: u8) -> Option<usize> {
    loop {
        let at = cursor.offset();
        match cursor.advance()? {
            b'\\' => {
                cursor.advance();
            }
            byte if byte == quote => return Some(at),
            _ => {}
        }
    }
}

/// Consumes a `/* */` comment with the cursor after `/*`. Returns
/// `false` when the input ends first.
pub(crate) fn skip_block_comment(cursor: &mut ByteCursor<'_>) -> bool {
    while let Some(byte) = cursor.advance() {
        if byte == b'*' && cursor.eat(b'/') {
            return true;
        }
    }
    false
}

/// Script tokenizer producing one [`Step`] per call.
pub struct Lexer<'a, M = StandardOperators> {
    cursor: ByteCursor<'a>,
    options: LexOptions,
    matcher: M,
    /// The two most recent tokens, oldest first.
    lookback: [Option<Token>; 2],
    finished: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(src: &'a [u8], options: &LexOptions) -> Self {
        Self::from_cursor(ByteCursor::new(src, options.start_line), options)
    }

    /// Lexer over the content of one CODE segment of `doc`. Token spans
    /// and lines are those of the whole document.
    #[must_use]
    pub fn for_segment(doc: &'a [u8], segment: &Segment, options: &LexOptions) -> Self {
        let cursor = ByteCursor::with_range(
            doc,
            segment.text.start,
            segment.text.end(),
            segment.start_line,
        );
        Self::from_cursor(cursor, options)
    }

    const fn from_cursor(cursor: ByteCursor<'a>, options: &LexOptions) -> Self {
        Self {
            cursor,
            options: *options,
            matcher: StandardOperators,
            lookback: [None, None],
            finished: false,
        }
    }
}

impl<'a, M: OperatorMatcher> Lexer<'a, M> {
    /// Replaces the operator table.
    #[must_use]
    pub fn with_matcher<N: OperatorMatcher>(self, matcher: N) -> Lexer<'a, N> {
        Lexer {
            cursor: self.cursor,
            options: self.options,
            matcher,
            lookback: self.lookback,
            finished: self.finished,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset()
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Runs the lexer to the end, applying every step.
    pub fn collect_tokens(self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        for step in self {
            step?.apply(&mut tokens);
        }
        Ok(tokens)
    }

    /// Produces the next step, or a [`LexErrorKind::Eof`] error once the
    /// input is exhausted.
    pub fn next_step(&mut self) -> Result<Step, LexError> {
        loop {
            if let Some(step) = self.scan()? {
                trace!(?step, "lexed");
                self.remember(step);
                return Ok(step);
            }
        }
    }

    const fn remember(&mut self, step: Step) {
        self.lookback = match step {
            Step::Emit(token) => [self.lookback[1], Some(token)],
            Step::ReplaceLast { token, .. } => [None, Some(token)],
        };
    }

    const fn previous(&self) -> Option<&Token> {
        self.lookback[1].as_ref()
    }

    /// One dispatch round. `Ok(None)` means a comment was skipped.
    fn scan(&mut self) -> Result<Option<Step>, LexError> {
        self.cursor.skip_while(is_space);
        let start = self.cursor.offset();
        let line = self.cursor.line();
        let Some(byte) = self.cursor.peek() else {
            return Err(LexError::new(LexErrorKind::Eof, start, line));
        };

        let token = match byte {
            b if b.is_ascii_alphabetic() || b == b'_' || is_utf8_lead(b) => self.word(start, line),
            b'#' => {
                self.cursor.skip_to_line_end();
                return Ok(None);
            }
            b'/' if self.cursor.peek_at(1) == Some(b'/') => {
                self.cursor.skip_to_line_end();
                return Ok(None);
            }
            b'/' if self.cursor.peek_at(1) == Some(b'*') => {
                self.cursor.advance_by(2);
                if !skip_block_comment(&mut self.cursor) && self.options.is_strict() {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedComment,
                        start,
                        line,
                    ));
                }
                return Ok(None);
            }
            b'0'..=b'9' => self.number(start, line),
            b'\'' => self.quoted(TokenKind::SingleQuotedString, byte, start, line)?,
            b'"' => self.quoted(TokenKind::DoubleQuotedString, byte, start, line)?,
            b'`' => self.quoted(TokenKind::BacktickString, byte, start, line)?,
            b'<' if self.cursor.starts_with(b"<<<") => {
                let snapshot = self.cursor;
                self.cursor.advance_by(3);
                match heredoc::scan(&mut self.cursor, &self.options, start, line)? {
                    Some(token) => token,
                    None => {
                        self.cursor = snapshot;
                        self.operator(start, line)
                    }
                }
            }
            b'$' => self.single(TokenKind::Dollar, start, line),
            b'{' => self.single(TokenKind::OpenCurly, start, line),
            b'}' => self.single(TokenKind::CloseCurly, start, line),
            b'(' => self.single(TokenKind::OpenParen, start, line),
            b'[' => {
                let token = self.single(TokenKind::OpenBracket, start, line);
                self.attach_operator(token, b"[")
            }
            b']' => self.single(TokenKind::CloseBracket, start, line),
            b'\\' => self.single(TokenKind::NamespaceSep, start, line),
            b';' => self.single(TokenKind::Semicolon, start, line),
            b',' => {
                let token = self.single(TokenKind::Comma, start, line);
                self.attach_operator(token, b",")
            }
            b':' if self.cursor.peek_at(1) == Some(b':') => {
                self.cursor.advance_by(2);
                self.resolve_symbol(ByteSpan::new(start, 2), b"::", line)
            }
            b':' => self.single(TokenKind::Colon, start, line),
            b')' => return Ok(Some(self.close_paren(start, line))),
            _ => self.operator(start, line),
        };
        Ok(Some(Step::Emit(token)))
    }

    fn single(&mut self, kind: TokenKind, start: usize, line: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, ByteSpan::new(start, 1), line)
    }

    /// Records the operator reading of a structural token, if any.
    fn attach_operator(&self, token: Token, lexeme: &[u8]) -> Token {
        match self.matcher.resolve(lexeme, self.previous()) {
            Some(op) => token.with_payload(TokenPayload::Operator(op)),
            None => token,
        }
    }

    fn word(&mut self, start: usize, line: u32) -> Token {
        while let Some(byte) = self.cursor.peek() {
            if is_utf8_lead(byte) {
                self.cursor.advance();
                self.cursor.skip_while(is_utf8_continuation);
            } else if is_word_byte(byte) {
                self.cursor.skip_while(is_word_byte);
            } else {
                break;
            }
        }
        let text = ByteSpan::between(start, self.cursor.offset());
        let spelling = text.slice(self.cursor.source());

        match keywords::lookup(spelling) {
            Some(WordKind::Plain(keyword)) => Token::new(TokenKind::Keyword(keyword), text, line)
                .with_payload(TokenPayload::Keyword(keyword)),
            Some(WordKind::OperatorWord(_)) => match self.matcher.resolve(spelling, self.previous())
            {
                Some(op) => Token::new(TokenKind::OperatorWord(op), text, line)
                    .with_payload(TokenPayload::Operator(op)),
                None => Token::new(TokenKind::Identifier, text, line),
            },
            None => Token::new(TokenKind::Identifier, text, line),
        }
    }

    fn number(&mut self, start: usize, line: u32) -> Token {
        let first = self.cursor.advance();
        let radix_digit: Option<fn(u8) -> bool> = match (first, self.cursor.peek()) {
            (Some(b'0'), Some(b'x' | b'X')) => Some(|b: u8| b.is_ascii_hexdigit()),
            (Some(b'0'), Some(b'b' | b'B')) => Some(|b: u8| b == b'0' || b == b'1'),
            _ => None,
        };
        if let Some(is_digit) = radix_digit {
            if self.cursor.peek_at(1).is_some_and(is_digit) {
                self.cursor.advance();
                self.cursor.skip_while(is_digit);
                let text = ByteSpan::between(start, self.cursor.offset());
                return Token::new(TokenKind::Integer, text, line);
            }
        }

        self.cursor.skip_while(|b| b.is_ascii_digit());
        let mut kind = TokenKind::Integer;
        if self.cursor.eat(b'.') {
            self.cursor.skip_while(|b| b.is_ascii_digit());
            kind = TokenKind::Real;
        }
        if matches!(self.cursor.peek(), Some(b'e' | b'E')) {
            let digits_at = if matches!(self.cursor.peek_at(1), Some(b'+' | b'-')) {
                2
            } else {
                1
            };
            if self
                .cursor
                .peek_at(digits_at)
                .is_some_and(|b| b.is_ascii_digit())
            {
                self.cursor.advance_by(digits_at);
                self.cursor.skip_while(|b| b.is_ascii_digit());
                kind = TokenKind::Real;
            }
        }
        Token::new(kind, ByteSpan::between(start, self.cursor.offset()), line)
    }

    fn quoted(
        &mut self,
        kind: TokenKind,
        quote: u8,
        start: usize,
        line: u32,
    ) -> Result<Token, LexError> {
        self.cursor.advance();
        let body_start = self.cursor.offset();
        let body_end = match skip_quoted(&mut self.cursor, quote) {
            Some(end) => end,
            None if self.options.is_strict() => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    start,
                    line,
                ));
            }
            None => self.cursor.offset(),
        };
        Ok(Token::new(
            kind,
            ByteSpan::between(body_start, body_end),
            line,
        ))
    }

    /// `)`, merging `(`, a cast keyword and `)` into one cast operator.
    fn close_paren(&mut self, start: usize, line: u32) -> Step {
        let close = self.single(TokenKind::CloseParen, start, line);
        let [Some(open), Some(word)] = self.lookback else {
            return Step::Emit(close);
        };
        let TokenKind::Keyword(keyword) = word.kind else {
            return Step::Emit(close);
        };
        if open.kind != TokenKind::OpenParen {
            return Step::Emit(close);
        }
        let Some(cast) = keyword.cast_operator() else {
            return Step::Emit(close);
        };
        match self.matcher.resolve(cast.spelling().as_bytes(), None) {
            Some(op) => {
                debug!(offset = open.text.start, cast = op.spelling(), "merged cast");
                let token = Token::new(
                    TokenKind::Operator(op),
                    ByteSpan::cover(open.text, close.text),
                    open.line,
                )
                .with_payload(TokenPayload::Operator(op));
                Step::ReplaceLast { count: 2, token }
            }
            None => Step::Emit(close),
        }
    }

    fn operator(&mut self, start: usize, line: u32) -> Token {
        let len = assemble(self.cursor.rest());
        self.cursor.advance_by(len);
        let text = ByteSpan::new(start, len);
        let lexeme = text.slice(self.cursor.source());

        if lexeme == b"=>" {
            return Token::new(TokenKind::ArrayArrow, text, line);
        }
        if lexeme == b"=" {
            if let Some(end) = self.reference_amp() {
                return self.resolve_symbol(ByteSpan::between(start, end), b"=&", line);
            }
        }
        self.resolve_symbol(text, lexeme, line)
    }

    /// After `=`, consumes optional whitespace and a lone `&`, returning
    /// the end of the `&`. Leaves the cursor alone otherwise.
    fn reference_amp(&mut self) -> Option<usize> {
        let snapshot = self.cursor;
        self.cursor.skip_while(is_space);
        if self.cursor.peek() == Some(b'&') && self.cursor.peek_at(1) != Some(b'&') {
            self.cursor.advance();
            return Some(self.cursor.offset());
        }
        self.cursor = snapshot;
        None
    }

    fn resolve_symbol(&self, text: ByteSpan, lexeme: &[u8], line: u32) -> Token {
        match self.matcher.resolve(lexeme, self.previous()) {
            Some(op) => {
                Token::new(TokenKind::Operator(op), text, line).with_payload(TokenPayload::Operator(op))
            }
            None => {
                debug!(offset = text.start, "unknown symbol run");
                Token::new(TokenKind::Other, text, line)
            }
        }
    }
}

impl<M: OperatorMatcher> Iterator for Lexer<'_, M> {
    type Item = Result<Step, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_step() {
            Ok(step) => Some(Ok(step)),
            Err(err) => {
                self.finished = true;
                (!err.is_eof()).then_some(Err(err))
            }
        }
    }
}
