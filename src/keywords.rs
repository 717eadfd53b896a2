//! Reserved words of the scripting language.
//!
//! The table is built once into an `FxHashMap` and never mutated, so
//! concurrent lexers read it without locking.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::operator::OperatorId;

/// Reserved (non-operator) words. Aliases share one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Abstract,
    Array,
    As,
    Bool,
    Break,
    Callable,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Declare,
    Default,
    Die,
    Do,
    Echo,
    /// `elseif` or `elif`.
    ElseIf,
    Else,
    Empty,
    EndDeclare,
    EndFor,
    EndForeach,
    EndIf,
    EndSwitch,
    EndWhile,
    Eval,
    Exit,
    Extends,
    Final,
    Finally,
    Float,
    For,
    Foreach,
    Function,
    Global,
    Goto,
    If,
    Implements,
    Include,
    IncludeOnce,
    Int,
    Interface,
    Isset,
    List,
    Namespace,
    Object,
    Parent,
    Print,
    Private,
    Protected,
    Public,
    Require,
    RequireOnce,
    Return,
    SelfKw,
    Static,
    String,
    Switch,
    Throw,
    Try,
    Unset,
    Use,
    Var,
    While,
}

impl KeywordId {
    /// Cast operator named by `(KEYWORD)`, for the seven cast types.
    #[must_use]
    pub const fn cast_operator(self) -> Option<OperatorId> {
        match self {
            Self::Int => Some(OperatorId::CastInt),
            Self::Float => Some(OperatorId::CastFloat),
            Self::Bool => Some(OperatorId::CastBool),
            Self::String => Some(OperatorId::CastString),
            Self::Array => Some(OperatorId::CastArray),
            Self::Object => Some(OperatorId::CastObject),
            Self::Unset => Some(OperatorId::CastUnset),
            _ => None,
        }
    }
}

/// Classification of an identifier-shaped word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    Plain(KeywordId),
    /// Lexically a word, grammatically an operator.
    OperatorWord(OperatorId),
}

const ENTRIES: &[(&[u8], WordKind)] = &[
    (b"abstract", WordKind::Plain(KeywordId::Abstract)),
    (b"array", WordKind::Plain(KeywordId::Array)),
    (b"as", WordKind::Plain(KeywordId::As)),
    (b"bool", WordKind::Plain(KeywordId::Bool)),
    (b"boolean", WordKind::Plain(KeywordId::Bool)),
    (b"break", WordKind::Plain(KeywordId::Break)),
    (b"callable", WordKind::Plain(KeywordId::Callable)),
    (b"case", WordKind::Plain(KeywordId::Case)),
    (b"catch", WordKind::Plain(KeywordId::Catch)),
    (b"class", WordKind::Plain(KeywordId::Class)),
    (b"const", WordKind::Plain(KeywordId::Const)),
    (b"continue", WordKind::Plain(KeywordId::Continue)),
    (b"declare", WordKind::Plain(KeywordId::Declare)),
    (b"default", WordKind::Plain(KeywordId::Default)),
    (b"die", WordKind::Plain(KeywordId::Die)),
    (b"do", WordKind::Plain(KeywordId::Do)),
    (b"double", WordKind::Plain(KeywordId::Float)),
    (b"echo", WordKind::Plain(KeywordId::Echo)),
    (b"elif", WordKind::Plain(KeywordId::ElseIf)),
    (b"else", WordKind::Plain(KeywordId::Else)),
    (b"elseif", WordKind::Plain(KeywordId::ElseIf)),
    (b"empty", WordKind::Plain(KeywordId::Empty)),
    (b"enddeclare", WordKind::Plain(KeywordId::EndDeclare)),
    (b"endfor", WordKind::Plain(KeywordId::EndFor)),
    (b"endforeach", WordKind::Plain(KeywordId::EndForeach)),
    (b"endif", WordKind::Plain(KeywordId::EndIf)),
    (b"endswitch", WordKind::Plain(KeywordId::EndSwitch)),
    (b"endwhile", WordKind::Plain(KeywordId::EndWhile)),
    (b"eval", WordKind::Plain(KeywordId::Eval)),
    (b"exit", WordKind::Plain(KeywordId::Exit)),
    (b"extends", WordKind::Plain(KeywordId::Extends)),
    (b"final", WordKind::Plain(KeywordId::Final)),
    (b"finally", WordKind::Plain(KeywordId::Finally)),
    (b"float", WordKind::Plain(KeywordId::Float)),
    (b"for", WordKind::Plain(KeywordId::For)),
    (b"foreach", WordKind::Plain(KeywordId::Foreach)),
    (b"function", WordKind::Plain(KeywordId::Function)),
    (b"global", WordKind::Plain(KeywordId::Global)),
    (b"goto", WordKind::Plain(KeywordId::Goto)),
    (b"if", WordKind::Plain(KeywordId::If)),
    (b"implements", WordKind::Plain(KeywordId::Implements)),
    (b"include", WordKind::Plain(KeywordId::Include)),
    (b"include_once", WordKind::Plain(KeywordId::IncludeOnce)),
    (b"int", WordKind::Plain(KeywordId::Int)),
    (b"integer", WordKind::Plain(KeywordId::Int)),
    (b"interface", WordKind::Plain(KeywordId::Interface)),
    (b"isset", WordKind::Plain(KeywordId::Isset)),
    (b"list", WordKind::Plain(KeywordId::List)),
    (b"namespace", WordKind::Plain(KeywordId::Namespace)),
    (b"object", WordKind::Plain(KeywordId::Object)),
    (b"parent", WordKind::Plain(KeywordId::Parent)),
    (b"print", WordKind::Plain(KeywordId::Print)),
    (b"private", WordKind::Plain(KeywordId::Private)),
    (b"protected", WordKind::Plain(KeywordId::Protected)),
    (b"public", WordKind::Plain(KeywordId::Public)),
    (b"require", WordKind::Plain(KeywordId::Require)),
    (b"require_once", WordKind::Plain(KeywordId::RequireOnce)),
    (b"return", WordKind::Plain(KeywordId::Return)),
    (b"self", WordKind::Plain(KeywordId::SelfKw)),
    (b"static", WordKind::Plain(KeywordId::Static)),
    (b"string", WordKind::Plain(KeywordId::String)),
    (b"switch", WordKind::Plain(KeywordId::Switch)),
    (b"throw", WordKind::Plain(KeywordId::Throw)),
    (b"try", WordKind::Plain(KeywordId::Try)),
    (b"unset", WordKind::Plain(KeywordId::Unset)),
    (b"use", WordKind::Plain(KeywordId::Use)),
    (b"var", WordKind::Plain(KeywordId::Var)),
    (b"while", WordKind::Plain(KeywordId::While)),
    (b"new", WordKind::OperatorWord(OperatorId::New)),
    (b"clone", WordKind::OperatorWord(OperatorId::Clone)),
    (b"and", WordKind::OperatorWord(OperatorId::WordAnd)),
    (b"or", WordKind::OperatorWord(OperatorId::WordOr)),
    (b"xor", WordKind::OperatorWord(OperatorId::WordXor)),
    (b"instanceof", WordKind::OperatorWord(OperatorId::InstanceOf)),
    (b"eq", WordKind::OperatorWord(OperatorId::StrEq)),
    (b"ne", WordKind::OperatorWord(OperatorId::StrNe)),
];

static TABLE: LazyLock<FxHashMap<&'static [u8], WordKind>> =
    LazyLock::new(|| ENTRIES.iter().copied().collect());

/// Look up an identifier. Case-sensitive; words shorter than two bytes
/// are never reserved.
#[must_use]
pub fn lookup(ident: &[u8]) -> Option<WordKind> {
    if ident.len() < 2 {
        return None;
    }
    TABLE.get(ident).copied()
}
