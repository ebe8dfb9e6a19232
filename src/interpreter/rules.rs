//! Process-wide, immutable symbol table shared by the structurer and the
//! reducer.

use crate::{
    error::CalcResult,
    interpreter::{
        evaluator::binary::{arithmetic, comparison, power},
        value::core::Value,
    },
};

/// Characters that open a bracketed group.
pub const OPEN_BRACKETS: [char; 3] = ['(', '[', '{'];
/// Characters that close a bracketed group, index-aligned with
/// [`OPEN_BRACKETS`].
pub const CLOSE_BRACKETS: [char; 3] = [')', ']', '}'];

/// Every operator spelling the structurer recognizes.
///
/// `^`, `=` and `!` are recognized so that the structurer splits on them,
/// but they have no entry in [`OPERATOR_TABLE`] and are rejected by the
/// reducer.
pub const OPERATOR_SYMBOLS: [&str; 16] = ["+", "-", "*", "/", "^", "%", "//", "**", "<", "<=",
                                         "==", "!=", ">=", ">", "=", "!"];

/// Two-character operators, matched before their one-character prefixes.
pub const COMPOUND_OPERATORS: [&str; 6] = ["**", "//", "==", "!=", "<=", ">="];

/// Priority of comparison operators.
pub const COMPARISON_PRIORITY: u8 = 5;
/// Priority of `+` and `-`.
pub const ADDITIVE_PRIORITY: u8 = 10;
/// Priority of `*`, `/`, `%` and `//`.
pub const MULTIPLICATIVE_PRIORITY: u8 = 15;
/// Priority of `**`, the only right-associative tier.
pub const POWER_PRIORITY: u8 = 20;

/// A binary operation over two values.
pub type BinaryFn = fn(&Value, &Value) -> CalcResult<Value>;

/// An operator bound to its implementation.
#[derive(Debug, Clone, Copy)]
pub struct OperatorEntry {
    /// The operator as written.
    pub symbol:   &'static str,
    /// The operation applied to the left and right neighbors.
    pub function: BinaryFn,
    /// Higher priorities fold first.
    pub priority: u8,
}

/// Which of several equal-priority operators folds first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The leftmost operator folds first: `8-2-1 == (8-2)-1`.
    Left,
    /// The rightmost operator folds first: `2**3**2 == 2**(3**2)`.
    Right,
}

/// Defines the operator table.
///
/// Each entry provides the operator spelling, its implementation and its
/// priority, and expands into an [`OperatorEntry`].
macro_rules! operator_table {
    (
        $(
            $symbol:literal => { func: $func:path, priority: $priority:expr $(,)? }
        ),* $(,)?
    ) => {
        /// Operators bound to an operation, in declaration order.
        pub static OPERATOR_TABLE: &[OperatorEntry] = &[
            $(
                OperatorEntry { symbol: $symbol, function: $func, priority: $priority },
            )*
        ];
    };
}

operator_table! {
    "+"  => { func: arithmetic::add,       priority: ADDITIVE_PRIORITY },
    "-"  => { func: arithmetic::sub,       priority: ADDITIVE_PRIORITY },
    "*"  => { func: arithmetic::mul,       priority: MULTIPLICATIVE_PRIORITY },
    "/"  => { func: arithmetic::true_div,  priority: MULTIPLICATIVE_PRIORITY },
    "%"  => { func: arithmetic::modulo,    priority: MULTIPLICATIVE_PRIORITY },
    "//" => { func: arithmetic::floor_div, priority: MULTIPLICATIVE_PRIORITY },
    "**" => { func: power::pow,            priority: POWER_PRIORITY },
    "<"  => { func: comparison::lt,        priority: COMPARISON_PRIORITY },
    "<=" => { func: comparison::le,        priority: COMPARISON_PRIORITY },
    "==" => { func: comparison::eq,        priority: COMPARISON_PRIORITY },
    "!=" => { func: comparison::ne,        priority: COMPARISON_PRIORITY },
    ">=" => { func: comparison::ge,        priority: COMPARISON_PRIORITY },
    ">"  => { func: comparison::gt,        priority: COMPARISON_PRIORITY },
}

impl OperatorEntry {
    /// Returns how ties between operators of this entry's priority resolve.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        associativity(self.priority)
    }
}

/// Returns the associativity of a priority tier.
///
/// Keyed on the tier, never on the operator: any operator placed in the
/// power tier folds right-to-left.
#[must_use]
pub const fn associativity(priority: u8) -> Associativity {
    if priority >= POWER_PRIORITY {
        Associativity::Right
    } else {
        Associativity::Left
    }
}

/// Looks up the operation bound to an operator spelling.
///
/// Returns `None` both for unknown text and for the recognized but unbound
/// operators `^`, `=` and `!`.
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static OperatorEntry> {
    OPERATOR_TABLE.iter().find(|entry| entry.symbol == symbol)
}

/// Returns the canonical `'static` spelling of a recognized operator.
#[must_use]
pub fn canonical_symbol(symbol: &str) -> Option<&'static str> {
    OPERATOR_SYMBOLS.iter().copied().find(|known| *known == symbol)
}

/// Returns `true` if the character starts or continues an operator.
#[must_use]
pub fn is_operator_char(c: char) -> bool {
    OPERATOR_SYMBOLS.iter().any(|symbol| symbol.starts_with(c))
}

/// Returns `true` if the operator may be written as a unary sign.
#[must_use]
pub fn is_sign(symbol: &str) -> bool {
    matches!(symbol, "+" | "-")
}

/// Returns `true` for `(`, `[` and `{`.
#[must_use]
pub fn is_open_bracket(c: char) -> bool {
    OPEN_BRACKETS.contains(&c)
}

/// Returns `true` for `)`, `]` and `}`.
#[must_use]
pub fn is_close_bracket(c: char) -> bool {
    CLOSE_BRACKETS.contains(&c)
}

/// Returns the closing bracket that matches an opening one.
#[must_use]
pub fn closing_bracket(open: char) -> Option<char> {
    OPEN_BRACKETS.iter()
                 .position(|&c| c == open)
                 .map(|index| CLOSE_BRACKETS[index])
}

/// Returns `true` for characters that end a literal or identifier: brackets
/// and operator characters.
#[must_use]
pub fn is_special(c: char) -> bool {
    is_open_bracket(c) || is_close_bracket(c) || is_operator_char(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bound_operator_is_recognized() {
        for entry in OPERATOR_TABLE {
            assert!(canonical_symbol(entry.symbol).is_some(), "{}", entry.symbol);
        }
    }

    #[test]
    fn bare_caret_equals_and_bang_are_unbound() {
        for symbol in ["^", "=", "!"] {
            assert!(canonical_symbol(symbol).is_some());
            assert!(lookup(symbol).is_none());
        }
    }

    #[test]
    fn priorities_follow_standard_precedence() {
        let priority = |s| lookup(s).map(|entry| entry.priority);
        assert!(priority("**") > priority("*"));
        assert!(priority("*") > priority("+"));
        assert!(priority("+") > priority("<"));
        assert_eq!(priority("//"), priority("%"));
    }

    #[test]
    fn only_the_power_tier_is_right_associative() {
        assert_eq!(associativity(POWER_PRIORITY), Associativity::Right);
        assert_eq!(associativity(ADDITIVE_PRIORITY), Associativity::Left);
        assert_eq!(associativity(COMPARISON_PRIORITY), Associativity::Left);
    }

    #[test]
    fn brackets_pair_up() {
        assert_eq!(closing_bracket('('), Some(')'));
        assert_eq!(closing_bracket('{'), Some('}'));
        assert_eq!(closing_bracket(')'), None);
    }
}
