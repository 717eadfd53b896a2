//! Token-level lexer tests.

mod common;

use common::{kinds, lex, texts};
use pretty_assertions::assert_eq;
use scriptlex::{
    KeywordId, LexErrorKind, LexOptions, Lexer, OperatorId, OperatorMatcher, Step, Token,
    TokenKind, TokenPayload, tokenize, tokenize_with,
};

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    assert!(lex("").is_empty());
}

#[test]
fn lex_only_whitespace_and_comments() {
    assert!(lex("  \n# note\n// more\n/* block\n */\n").is_empty());
}

#[test]
fn lex_statement() {
    assert_eq!(
        kinds("echo $a . 'x';"),
        vec![
            TokenKind::Keyword(KeywordId::Echo),
            TokenKind::Dollar,
            TokenKind::Identifier,
            TokenKind::Operator(OperatorId::Concat),
            TokenKind::SingleQuotedString,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn lex_structural_tokens() {
    assert_eq!(
        kinds("\\Foo { } ( ) ; :"),
        vec![
            TokenKind::NamespaceSep,
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Colon,
        ]
    );
}

#[test]
fn lex_lines_follow_newlines() {
    let tokens = lex("a\nb\n\n  c");
    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn lex_start_line_offsets_lines() {
    let options = LexOptions::default().with_start_line(10);
    let tokens = tokenize_with(b"a\nb", &options).expect("tokenize");
    assert_eq!(tokens[0].line, 10);
    assert_eq!(tokens[1].line, 11);
}

// -----------------------------------------------------------
// Words.
// -----------------------------------------------------------

#[test]
fn lex_keyword_payload() {
    let tokens = lex("echo");
    assert_eq!(tokens[0].kind, TokenKind::Keyword(KeywordId::Echo));
    assert_eq!(
        tokens[0].payload,
        Some(TokenPayload::Keyword(KeywordId::Echo))
    );
}

#[test]
fn lex_keywords_are_case_sensitive() {
    assert_eq!(kinds("ECHO While"), vec![TokenKind::Identifier; 2]);
}

#[test]
fn lex_keyword_aliases() {
    assert_eq!(kinds("elif elseif"), vec![TokenKind::Keyword(KeywordId::ElseIf); 2]);
}

#[test]
fn lex_operator_words() {
    let tokens = lex("$a instanceof B");
    assert_eq!(tokens[2].kind, TokenKind::OperatorWord(OperatorId::InstanceOf));
    assert_eq!(tokens[2].operator(), Some(OperatorId::InstanceOf));

    assert_eq!(
        kinds("new Foo"),
        vec![TokenKind::OperatorWord(OperatorId::New), TokenKind::Identifier]
    );
    assert_eq!(
        kinds("$a eq $b"),
        vec![
            TokenKind::Dollar,
            TokenKind::Identifier,
            TokenKind::OperatorWord(OperatorId::StrEq),
            TokenKind::Dollar,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn lex_identifier_with_digits_and_underscores() {
    assert_eq!(texts("_foo_1 bar2"), vec!["_foo_1", "bar2"]);
}

#[test]
fn lex_utf8_identifiers() {
    assert_eq!(texts("$café = 1"), vec!["$", "café", "=", "1"]);
    assert_eq!(kinds("日本語"), vec![TokenKind::Identifier]);
}

#[test]
fn lex_stray_continuation_byte_is_other() {
    let tokens = tokenize(&[0x80, b' ', b'a']).expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Other);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

// -----------------------------------------------------------
// Numbers.
// -----------------------------------------------------------

#[test]
fn lex_integers_and_reals() {
    assert_eq!(
        kinds("10 0x1f 0B11 1.5 .5e1 2e3 1.5e+3 4E-2"),
        vec![
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Real,
            TokenKind::Operator(OperatorId::Concat),
            TokenKind::Real,
            TokenKind::Real,
            TokenKind::Real,
            TokenKind::Real,
        ]
    );
}

#[test]
fn lex_radix_prefix_without_digits() {
    assert_eq!(texts("0x"), vec!["0", "x"]);
}

#[test]
fn lex_exponent_needs_digits() {
    assert_eq!(texts("1e"), vec!["1", "e"]);
    assert_eq!(texts("1.5e+3"), vec!["1.5e+3"]);
}

// -----------------------------------------------------------
// Strings.
// -----------------------------------------------------------

#[test]
fn lex_escaped_quote_does_not_terminate() {
    let tokens = lex(r"'it\'s'");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::SingleQuotedString);
    assert_eq!(tokens[0].text_in(br"'it\'s'"), br"it\'s");
}

#[test]
fn lex_even_backslashes_terminate() {
    let src = r"'a\\'b'";
    let tokens = lex(src);
    assert_eq!(texts(src), vec![r"a\\", "b", ""]);
    assert_eq!(tokens[0].kind, TokenKind::SingleQuotedString);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::SingleQuotedString);
}

#[test]
fn lex_double_quoted_escapes() {
    let src = r#""say \"hi\"" ;"#;
    assert_eq!(texts(src), vec![r#"say \"hi\""#, ";"]);
    assert_eq!(kinds(src)[0], TokenKind::DoubleQuotedString);
}

#[test]
fn lex_interpolation_region_nests() {
    let src = r#""a {$x['}']} b {$y[{$z}]}" ;"#;
    assert_eq!(texts(src), vec![r#"a {$x['}']} b {$y[{$z}]}"#, ";"]);
}

#[test]
fn lex_brace_without_dollar_is_plain_text() {
    let src = r#""{" "}""#;
    assert_eq!(texts(src), vec!["{", "}"]);
}

#[test]
fn lex_backtick_string() {
    let tokens = lex("`ls -la`");
    assert_eq!(tokens[0].kind, TokenKind::BacktickString);
    assert_eq!(texts("`ls -la`"), vec!["ls -la"]);
}

#[test]
fn lex_multiline_string_advances_line() {
    let tokens = lex("'a\nb' c");
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn lex_unterminated_string_is_lenient_by_default() {
    assert_eq!(texts("'abc"), vec!["abc"]);
}

// -----------------------------------------------------------
// Heredoc and nowdoc.
// -----------------------------------------------------------

#[test]
fn lex_heredoc_then_semicolon() {
    let src = "<<<EOT\nhello\nEOT;";
    assert_eq!(kinds(src), vec![TokenKind::Heredoc, TokenKind::Semicolon]);
    assert_eq!(texts(src), vec!["hello", ";"]);
}

#[test]
fn lex_nowdoc_kind() {
    let src = "<<<'EOT'\n$x\nEOT";
    assert_eq!(kinds(src), vec![TokenKind::Nowdoc]);
    assert_eq!(texts(src), vec!["$x"]);
}

#[test]
fn lex_heredoc_lines() {
    let tokens = lex("$a = <<<EOT\nx\ny\nEOT;\n$b");
    assert_eq!(tokens[3].kind, TokenKind::Heredoc);
    assert_eq!(tokens[3].line, 1);
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[4].line, 4);
    assert_eq!(tokens[5].line, 5);
}

#[test]
fn lex_heredoc_crlf() {
    let src = "<<<EOT\r\nhi\r\nEOT;\r\n";
    assert_eq!(texts(src), vec!["hi", ";"]);
}

#[test]
fn lex_heredoc_relaxed_delimiter() {
    let src = "<<<1ÉT\nx\n1ÉT\n";
    assert_eq!(kinds(src), vec![TokenKind::Heredoc]);
    assert_eq!(texts(src), vec!["x"]);
}

#[test]
fn lex_heredoc_standard_delimiter_rejects_digit() {
    let options = LexOptions::default().with_delimiters(scriptlex::DelimiterRule::Standard);
    let tokens = tokenize_with("<<<1EOT\nx\n1EOT\n".as_bytes(), &options).expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Operator(OperatorId::Shl));
}

#[test]
fn lex_triple_angle_falls_back_to_operators() {
    assert_eq!(
        kinds("$a <<< 3"),
        vec![
            TokenKind::Dollar,
            TokenKind::Identifier,
            TokenKind::Operator(OperatorId::Shl),
            TokenKind::Operator(OperatorId::Lt),
            TokenKind::Integer,
        ]
    );
}

// -----------------------------------------------------------
// Operators.
// -----------------------------------------------------------

#[test]
fn lex_multi_byte_operators() {
    let src = "=== !== == != <> <= >= << >> <<= >>= && || ++ -- += -= *= /= %= ^= .= -> =>";
    let expected: Vec<&str> = src.split(' ').collect();
    assert_eq!(texts(src), expected);
    assert_eq!(kinds("<>")[0], TokenKind::Operator(OperatorId::NotEqual));
    assert_eq!(kinds("=>")[0], TokenKind::ArrayArrow);
}

#[test]
fn lex_unary_and_binary_minus() {
    assert_eq!(kinds("-1")[0], TokenKind::Operator(OperatorId::UnaryMinus));
    assert_eq!(kinds("$a - 1")[2], TokenKind::Operator(OperatorId::Sub));
    assert_eq!(kinds("f(-1)")[2], TokenKind::Operator(OperatorId::UnaryMinus));
}

#[test]
fn lex_reference_assignment() {
    let src = "$a = &$b;";
    assert_eq!(kinds(src)[2], TokenKind::Operator(OperatorId::RefAssign));
    assert_eq!(texts(src)[2], "= &");
    assert_eq!(kinds("$a & $b")[2], TokenKind::Operator(OperatorId::BitAnd));
}

#[test]
fn lex_assignment_before_logical_and_is_plain() {
    assert_eq!(
        kinds("= &&")[..2],
        [
            TokenKind::Operator(OperatorId::Assign),
            TokenKind::Operator(OperatorId::LogicalAnd),
        ]
    );
}

#[test]
fn lex_member_and_scope_operators() {
    assert_eq!(kinds("$o->m")[2], TokenKind::Operator(OperatorId::Arrow));
    assert_eq!(kinds("A::b")[1], TokenKind::Operator(OperatorId::StaticMember));
    assert_eq!(texts("A::b"), vec!["A", "::", "b"]);
}

#[test]
fn lex_comma_carries_operator() {
    let tokens = lex("f(a, b)");
    assert_eq!(tokens[3].kind, TokenKind::Comma);
    assert_eq!(tokens[3].operator(), Some(OperatorId::Comma));
}

#[test]
fn lex_bracket_context() {
    let tokens = lex("$a[0]");
    assert_eq!(tokens[2].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[2].operator(), Some(OperatorId::Subscript));
    assert_eq!(tokens[4].kind, TokenKind::CloseBracket);

    let tokens = lex("= [1]");
    assert_eq!(tokens[1].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[1].operator(), None);
}

#[test]
fn lex_single_symbol_operators() {
    assert_eq!(
        kinds("? @ ~ !"),
        vec![
            TokenKind::Operator(OperatorId::Ternary),
            TokenKind::Operator(OperatorId::ErrorSuppress),
            TokenKind::Operator(OperatorId::BitNot),
            TokenKind::Operator(OperatorId::LogicalNot),
        ]
    );
}

#[test]
fn lex_unknown_byte_is_other() {
    assert_eq!(kinds("\u{1}"), vec![TokenKind::Other]);
}

// -----------------------------------------------------------
// Type casts.
// -----------------------------------------------------------

#[test]
fn lex_cast_merge_canonical_spelling() {
    for (src, op) in [
        ("(int)", OperatorId::CastInt),
        ("(integer)", OperatorId::CastInt),
        ("(float)", OperatorId::CastFloat),
        ("(double)", OperatorId::CastFloat),
        ("(bool)", OperatorId::CastBool),
        ("(boolean)", OperatorId::CastBool),
        ("(string)", OperatorId::CastString),
        ("(array)", OperatorId::CastArray),
        ("(object)", OperatorId::CastObject),
        ("(unset)", OperatorId::CastUnset),
    ] {
        let tokens = lex(src);
        assert_eq!(tokens.len(), 1, "{src}");
        assert_eq!(tokens[0].kind, TokenKind::Operator(op), "{src}");
        assert_eq!(tokens[0].text_in(src.as_bytes()), src.as_bytes());
    }
    assert_eq!(OperatorId::CastInt.spelling(), "(int)");
}

#[test]
fn lex_cast_with_inner_whitespace() {
    let src = "( int )$x";
    assert_eq!(texts(src), vec!["( int )", "$", "x"]);
}

#[test]
fn lex_consecutive_casts() {
    assert_eq!(
        kinds("(int)(string)$x"),
        vec![
            TokenKind::Operator(OperatorId::CastInt),
            TokenKind::Operator(OperatorId::CastString),
            TokenKind::Dollar,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn lex_non_cast_parentheses() {
    assert_eq!(kinds("(foo)").len(), 3);
    assert_eq!(kinds("(echo)").len(), 3);
    assert_eq!(kinds("( $int )").len(), 4);
}

#[test]
fn lex_cast_arrives_as_replace_step() {
    let steps: Vec<Step> = Lexer::new(b"(int)", &LexOptions::default())
        .collect::<Result<_, _>>()
        .expect("lex");
    assert_eq!(steps.len(), 3);
    assert!(matches!(steps[0], Step::Emit(_)));
    assert!(matches!(steps[1], Step::Emit(_)));
    assert!(matches!(steps[2], Step::ReplaceLast { count: 2, .. }));
    let cast = steps[2].token().operator().expect("cast operator");
    assert!(cast.is_cast());
    assert_eq!(cast, OperatorId::CastInt);
}

// -----------------------------------------------------------
// Custom operator tables.
// -----------------------------------------------------------

struct NoOperators;

impl OperatorMatcher for NoOperators {
    fn resolve(&self, _lexeme: &[u8], _previous: Option<&Token>) -> Option<OperatorId> {
        None
    }
}

#[test]
fn lex_rejected_operators_become_other() {
    let tokens = Lexer::new(b"a + b and c", &LexOptions::default())
        .with_matcher(NoOperators)
        .collect_tokens()
        .expect("lex");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Other,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
        ]
    );
}

// -----------------------------------------------------------
// Lexer errors.
// -----------------------------------------------------------

fn strict_error(src: &str) -> scriptlex::LexError {
    tokenize_with(src.as_bytes(), &LexOptions::default().strict()).unwrap_err()
}

#[test]
fn lex_error_unterminated_strings() {
    assert_eq!(strict_error("'abc").kind, LexErrorKind::UnterminatedString);
    assert_eq!(strict_error("\"abc").kind, LexErrorKind::UnterminatedString);
    assert_eq!(strict_error("`abc").kind, LexErrorKind::UnterminatedString);
    assert_eq!(strict_error("\"a{$b\"").kind, LexErrorKind::UnterminatedString);
}

#[test]
fn lex_error_unterminated_comment() {
    assert_eq!(strict_error("a /* b").kind, LexErrorKind::UnterminatedComment);
    assert_eq!(texts("a /* b"), vec!["a"]);
}

#[test]
fn lex_error_unterminated_heredoc() {
    let err = strict_error("x = <<<EOT\nabc\n");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.offset, 4);
}

#[test]
fn lex_error_invalid_heredoc_delimiter() {
    assert_eq!(
        strict_error("<<<'' \nx\n").kind,
        LexErrorKind::InvalidHeredocDelimiter
    );
    assert_eq!(
        strict_error("<<<EOT junk\n").kind,
        LexErrorKind::InvalidHeredocDelimiter
    );
}

#[test]
fn lex_error_display_includes_location() {
    let err = strict_error("a\n'b");
    assert_eq!(err.line, 2);
    assert_eq!(err.offset, 2);
    assert_eq!(err.to_string(), "unterminated string at line 2, offset 2");
}

#[test]
fn lex_eof_is_not_a_failure() {
    let mut lexer = Lexer::new(b"a", &LexOptions::default());
    assert!(lexer.next_step().is_ok());
    let end = lexer.next_step().unwrap_err();
    assert!(end.is_eof());
    assert_eq!(end.offset, 1);
}
