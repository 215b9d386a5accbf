//! # Symbolic Engine Module
//!
//! This module holds the expression tree produced by the parser and consumed by both
//! evaluation modes.
//!
//! ## Main Structures and Methods
//!
//! ### `Expression` Enum
//! A closed sum type with three variants:
//! - **Value**: `Value(Polynomial)` - a packed sum of monomials (constants and unknowns parse to it)
//! - **Function**: `Function { function, args }` - a call of one of `cos, sin, tan, ln, log`
//! - **Calculus**: `Calculus { operator, left, right }` - an operator node; `left` is `None` for
//!   unary minus and `right` is `None` for the postfix factorial
//!
//! ### Key Methods
//! - `parse(text, unknowns)` - build a tree from a string
//! - `evaluate(&bindings)` - numeric evaluation (see `symbolic_lambdify`)
//! - `evaluate_symbolic()` - simplification into a sum of monomials (see `symbolic_simplify`)
//! - `to_string()` - infix form with the parentheses needed to parse it back
//! - `to_calculus_string()` - fully parenthesized infix form
//! - `set_unknown(symbol, value)` - substitute a constant for an unknown
//!
//! Trees are never mutated after construction: every transformation returns a new tree.
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

use crate::symbolic::engine_config::{DEFAULT_MAX_DEPTH, EngineConfig};
use crate::symbolic::errors::{ExprResult, ParseErrorKind};
use crate::symbolic::monomial::Polynomial;
use crate::symbolic::operators::Operator;
use crate::symbolic::parse_expr::parse_expression;
use crate::symbolic::symbolic_functions::Function;

/// Values of the unknowns for numeric evaluation
pub type Bindings = HashMap<char, f64>;

/// a single (unknown, value) pair, ready to be collected into [`Bindings`]
pub fn fix_value(symbol: char, value: f64) -> (char, f64) {
    (symbol, value)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Value(Polynomial),
    Function {
        function: Function,
        args: Vec<Expression>,
    },
    Calculus {
        operator: Operator,
        left: Option<Box<Expression>>,
        right: Option<Box<Expression>>,
    },
}

impl Expression {
    /// Parses `text`; single chars listed in `unknowns` are read as free variables.
    ///
    /// # Examples
    /// ```
    /// use RustedExpressions::symbolic::symbolic_engine::Expression;
    /// let expr = Expression::parse("2*x + 1", &['x']).unwrap();
    /// assert_eq!(expr.to_calculus_string(), "((2*x)+1)");
    /// ```
    pub fn parse(text: &str, unknowns: &[char]) -> ExprResult<Expression> {
        parse_expression(text, unknowns, DEFAULT_MAX_DEPTH)
    }

    /// Same as [`Expression::parse`] with the unknowns and nesting limit of `config`.
    pub fn parse_with_config(text: &str, config: &EngineConfig) -> ExprResult<Expression> {
        parse_expression(text, &config.unknowns, config.max_depth)
    }

    pub fn value(polynomial: Polynomial) -> Expression {
        Expression::Value(polynomial)
    }

    pub fn constant(value: f64) -> Expression {
        Expression::Value(Polynomial::constant(value))
    }

    pub fn unknown(symbol: char) -> Expression {
        Expression::Value(Polynomial::unknown(symbol))
    }

    /// Operator node; fails when a required operand is missing or when a postfix operator
    /// is given a right operand.
    pub fn calculus(
        operator: Operator,
        left: Option<Expression>,
        right: Option<Expression>,
    ) -> Result<Expression, ParseErrorKind> {
        if (left.is_none() && operator.needs_left()) || (right.is_none() && operator.needs_right())
        {
            return Err(ParseErrorKind::MissingOperand(operator));
        }
        if right.is_some() && operator.is_postfix() {
            return Err(ParseErrorKind::UnexpectedOperand(operator));
        }
        Ok(Expression::Calculus {
            operator,
            left: left.map(Box::new),
            right: right.map(Box::new),
        })
    }

    /// Function call node; the argument count is checked at evaluation time only.
    pub fn function(function: Function, args: Vec<Expression>) -> Expression {
        Expression::Function { function, args }
    }

    pub fn as_polynomial(&self) -> Option<&Polynomial> {
        match self {
            Expression::Value(p) => Some(p),
            _ => None,
        }
    }

    /// Every unknown the tree refers to, sorted and without duplicates.
    pub fn unknowns(&self) -> Vec<char> {
        let mut found = Vec::new();
        self.collect_unknowns(&mut found);
        found.into_iter().sorted().dedup().collect()
    }

    fn collect_unknowns(&self, found: &mut Vec<char>) {
        match self {
            Expression::Value(p) => found.extend(p.unknowns()),
            Expression::Function { args, .. } => {
                args.iter().for_each(|arg| arg.collect_unknowns(found))
            }
            Expression::Calculus { left, right, .. } => {
                for side in [left, right].into_iter().flatten() {
                    side.collect_unknowns(found);
                }
            }
        }
    }

    /// New tree where `symbol` is replaced by the constant `value`.
    pub fn set_unknown(&self, symbol: char, value: f64) -> Expression {
        match self {
            Expression::Value(p) => Expression::Value(p.substitute(symbol, value)),
            Expression::Function { function, args } => Expression::Function {
                function: *function,
                args: args.iter().map(|a| a.set_unknown(symbol, value)).collect(),
            },
            Expression::Calculus {
                operator,
                left,
                right,
            } => Expression::Calculus {
                operator: *operator,
                left: left.as_ref().map(|l| Box::new(l.set_unknown(symbol, value))),
                right: right.as_ref().map(|r| Box::new(r.set_unknown(symbol, value))),
            },
        }
    }

    /// Fully parenthesized infix form: every operator node is wrapped in parentheses.
    pub fn to_calculus_string(&self) -> String {
        match self {
            Expression::Value(p) => match value_precedence(p) {
                Some(_) if p.len() == 1 => format!("({})", p),
                _ => p.to_string(),
            },
            Expression::Function { function, args } => format!(
                "{}({})",
                function,
                args.iter().map(|a| a.to_calculus_string()).join(", ")
            ),
            Expression::Calculus {
                operator,
                left,
                right,
            } => format!(
                "({}{}{})",
                left.as_ref().map(|l| l.to_calculus_string()).unwrap_or_default(),
                operator.symbol(),
                right.as_ref().map(|r| r.to_calculus_string()).unwrap_or_default()
            ),
        }
    }

    /// whether `self`, printed as an operand of an operator of precedence `parent`, needs
    /// parentheses to be parsed back into the same tree
    fn needs_parentheses(&self, parent: u8, right_side: bool) -> bool {
        let precedence = match self {
            Expression::Calculus { operator, .. } => operator.precedence(),
            Expression::Value(p) => match value_precedence(p) {
                Some(precedence) => precedence,
                None => return false,
            },
            Expression::Function { .. } => return false,
        };
        if right_side {
            precedence <= parent
        } else {
            precedence < parent
        }
    }

    fn fmt_operand(
        &self,
        f: &mut fmt::Formatter,
        parent: u8,
        right_side: bool,
    ) -> fmt::Result {
        if self.needs_parentheses(parent, right_side) {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Precedence of the operator a printed polynomial reads as, None when it prints as an atom.
/// A single monomial prints as a product (`2*x`, `x*y`), a power (`x^2`) or, with a negative
/// coefficient, a unary minus; a longer sum is already wrapped in parentheses.
fn value_precedence(p: &Polynomial) -> Option<u8> {
    let [m] = p.monomials() else {
        return None;
    };
    if m.coefficient().is_sign_negative() {
        return Some(Operator::Sub.precedence());
    }
    match m.unknowns() {
        [] => None,
        [(_, exponent)] if m.coefficient() == 1.0 => {
            (*exponent != 1.0).then(|| Operator::Pow.precedence())
        }
        _ => Some(Operator::Mul.precedence()),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Value(p) => write!(f, "{}", p),
            Expression::Function { function, args } => {
                write!(f, "{}({})", function, args.iter().format(", "))
            }
            Expression::Calculus {
                operator,
                left,
                right,
            } => {
                let precedence = operator.precedence();
                if let Some(l) = left {
                    l.fmt_operand(f, precedence, false)?;
                }
                write!(f, "{}", operator.symbol())?;
                if let Some(r) = right {
                    r.fmt_operand(f, precedence, true)?;
                }
                Ok(())
            }
        }
    }
}

//___________________________________MACROS____________________________________

/// Macro to build [`Bindings`] from `symbol => value` pairs
/// Usage: bindings!('x' => 2.0, 'y' => 3) -> {x: 2.0, y: 3.0}
#[macro_export]
macro_rules! bindings {
    ($($symbol:expr => $value:expr),* $(,)?) => {
        {
            let mut map = $crate::symbolic::symbolic_engine::Bindings::new();
            $(
                map.insert($symbol, $value as f64);
            )*
            map
        }
    };
}
