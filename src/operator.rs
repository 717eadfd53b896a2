//! Operator resolution.
//!
//! The lexer only assembles candidate symbol runs; whether a run is a
//! real operator, and which one, is decided by an [`OperatorMatcher`].
//! The expression layer of the engine owns the operator table, so the
//! matcher is a trait and [`StandardOperators`] is the table the engine
//! ships with.

use crate::token::Token;

/// Every operator the expression layer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Assign,
    /// `=&`, reference assignment.
    RefAssign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ConcatAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// `.`
    Concat,
    UnaryPlus,
    UnaryMinus,
    Increment,
    Decrement,
    Equal,
    /// `!=` or `<>`.
    NotEqual,
    Identical,
    NotIdentical,
    Lt,
    Le,
    Gt,
    Ge,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    Shl,
    Shr,
    /// Unary `&`.
    Reference,
    /// `?`
    Ternary,
    /// `@`
    ErrorSuppress,
    /// `->`
    Arrow,
    /// `::`
    StaticMember,
    Comma,
    /// `[` after an operand.
    Subscript,
    New,
    Clone,
    /// `and`
    WordAnd,
    /// `or`
    WordOr,
    /// `xor`
    WordXor,
    InstanceOf,
    /// `eq`, string equality.
    StrEq,
    /// `ne`, string inequality.
    StrNe,
    CastInt,
    CastFloat,
    CastBool,
    CastString,
    CastArray,
    CastObject,
    CastUnset,
}

impl OperatorId {
    /// Canonical spelling. Merged tokens (casts, `=&` across
    /// whitespace) report this rather than their source bytes.
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::RefAssign => "=&",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::ConcatAssign => ".=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::Add | Self::UnaryPlus => "+",
            Self::Sub | Self::UnaryMinus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => ".",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Identical => "===",
            Self::NotIdentical => "!==",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LogicalNot => "!",
            Self::BitAnd | Self::Reference => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitNot => "~",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Ternary => "?",
            Self::ErrorSuppress => "@",
            Self::Arrow => "->",
            Self::StaticMember => "::",
            Self::Comma => ",",
            Self::Subscript => "[",
            Self::New => "new",
            Self::Clone => "clone",
            Self::WordAnd => "and",
            Self::WordOr => "or",
            Self::WordXor => "xor",
            Self::InstanceOf => "instanceof",
            Self::StrEq => "eq",
            Self::StrNe => "ne",
            Self::CastInt => "(int)",
            Self::CastFloat => "(float)",
            Self::CastBool => "(bool)",
            Self::CastString => "(string)",
            Self::CastArray => "(array)",
            Self::CastObject => "(object)",
            Self::CastUnset => "(unset)",
        }
    }

    #[must_use]
    pub const fn is_cast(self) -> bool {
        matches!(
            self,
            Self::CastInt
                | Self::CastFloat
                | Self::CastBool
                | Self::CastString
                | Self::CastArray
                | Self::CastObject
                | Self::CastUnset
        )
    }
}

/// Decides whether a candidate lexeme is an operator.
///
/// `previous` is the last token emitted before the candidate; matchers
/// use it to tell unary from binary forms.
pub trait OperatorMatcher {
    fn resolve(&self, lexeme: &[u8], previous: Option<&Token>) -> Option<OperatorId>;
}

impl<M: OperatorMatcher + ?Sized> OperatorMatcher for &M {
    fn resolve(&self, lexeme: &[u8], previous: Option<&Token>) -> Option<OperatorId> {
        (**self).resolve(lexeme, previous)
    }
}

/// The operator table of the engine's expression layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardOperators;

impl OperatorMatcher for StandardOperators {
    fn resolve(&self, lexeme: &[u8], previous: Option<&Token>) -> Option<OperatorId> {
        let after_operand = previous.is_some_and(|t| t.kind.ends_operand());
        let op = match lexeme {
            b"+" if after_operand => OperatorId::Add,
            b"+" => OperatorId::UnaryPlus,
            b"-" if after_operand => OperatorId::Sub,
            b"-" => OperatorId::UnaryMinus,
            b"&" if after_operand => OperatorId::BitAnd,
            b"&" => OperatorId::Reference,
            // An array literal opener is not an operator.
            b"[" if after_operand => OperatorId::Subscript,
            _ => return fixed(lexeme),
        };
        Some(op)
    }
}

/// Context-free part of the table.
fn fixed(lexeme: &[u8]) -> Option<OperatorId> {
    use OperatorId as Op;

    let op = match lexeme {
        b"=" => Op::Assign,
        b"=&" => Op::RefAssign,
        b"+=" => Op::AddAssign,
        b"-=" => Op::SubAssign,
        b"*=" => Op::MulAssign,
        b"/=" => Op::DivAssign,
        b"%=" => Op::ModAssign,
        b".=" => Op::ConcatAssign,
        b"&=" => Op::AndAssign,
        b"|=" => Op::OrAssign,
        b"^=" => Op::XorAssign,
        b"<<=" => Op::ShlAssign,
        b">>=" => Op::ShrAssign,
        b"*" => Op::Mul,
        b"/" => Op::Div,
        b"%" => Op::Mod,
        b"." => Op::Concat,
        b"++" => Op::Increment,
        b"--" => Op::Decrement,
        b"==" => Op::Equal,
        b"!=" | b"<>" => Op::NotEqual,
        b"===" => Op::Identical,
        b"!==" => Op::NotIdentical,
        b"<" => Op::Lt,
        b"<=" => Op::Le,
        b">" => Op::Gt,
        b">=" => Op::Ge,
        b"&&" => Op::LogicalAnd,
        b"||" => Op::LogicalOr,
        b"!" => Op::LogicalNot,
        b"|" => Op::BitOr,
        b"^" => Op::BitXor,
        b"~" => Op::BitNot,
        b"<<" => Op::Shl,
        b">>" => Op::Shr,
        b"?" => Op::Ternary,
        b"@" => Op::ErrorSuppress,
        b"->" => Op::Arrow,
        b"::" => Op::StaticMember,
        b"," => Op::Comma,
        b"new" => Op::New,
        b"clone" => Op::Clone,
        b"and" => Op::WordAnd,
        b"or" => Op::WordOr,
        b"xor" => Op::WordXor,
        b"instanceof" => Op::InstanceOf,
        b"eq" => Op::StrEq,
        b"ne" => Op::StrNe,
        b"(int)" => Op::CastInt,
        b"(float)" => Op::CastFloat,
        b"(bool)" => Op::CastBool,
        b"(string)" => Op::CastString,
        b"(array)" => Op::CastArray,
        b"(object)" => Op::CastObject,
        b"(unset)" => Op::CastUnset,
        _ => return None,
    };
    Some(op)
}
