//! Error types of the expression engine.
//!
//! Parse failures carry a structured [`ParseError`] (kind, offset and a short excerpt of the
//! source around the offset); evaluation failures are plain variants of [`ExprError`].
use thiserror::Error;

use crate::symbolic::operators::Operator;

/// What went wrong while parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// a range (or a parenthesis group) with nothing inside
    #[error("empty body")]
    EmptyBody,
    /// `)` without an opening `(`, or `(` never closed
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    /// `name(...)` where `name` is not in the function table
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    /// `f(,x)`, `f(x,)`, `f(x,,y)` or `f()`
    #[error("empty function parameter")]
    EmptyParameter,
    /// the terminal token is neither a constant, an allowed unknown nor a number
    #[error("cannot parse value")]
    InvalidValue,
    /// an operator is missing an operand it requires
    #[error("missing operand for operator '{}'", .0.symbol())]
    MissingOperand(Operator),
    /// an operand was found where the operator takes none (e.g. `3!2`)
    #[error("operator '{}' takes no operand on this side", .0.symbol())]
    UnexpectedOperand(Operator),
}

/// Structured parse failure. `offset` and `excerpt_start` are char offsets into the
/// whitespace-stripped source.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at offset {offset} near '{excerpt}'")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    pub excerpt_start: usize,
    pub excerpt: String,
}

impl ParseError {
    /// Builds the error and cuts the excerpt: it starts two chars before the offset and is
    /// extended to the left up to the previous operator or `)`, and ends six chars after
    /// the initial start.
    pub fn new(kind: ParseErrorKind, source: &[char], offset: usize) -> Self {
        let base_start = offset.saturating_sub(2).min(source.len());
        let mut start = base_start;
        while start > 0 {
            let c = source[start - 1];
            if Operator::from_symbol(c).is_some() || c == ')' {
                break;
            }
            start -= 1;
        }
        let end = (base_start + 6).min(source.len());
        let excerpt: String = source[start..end].iter().collect();
        ParseError {
            kind,
            offset,
            excerpt_start: start,
            excerpt,
        }
    }

    /// Two-line diagnostic with a caret under the offending char
    pub fn render(&self) -> String {
        format!(
            "{} ...\n{}^",
            self.excerpt,
            " ".repeat(self.offset.saturating_sub(self.excerpt_start))
        )
    }
}

/// Every failure the engine reports
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{function} function takes {expected} argument(s), {found} given")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("cannot evaluate {what} for invalid argument {value}")]
    Domain { what: String, value: f64 },
    #[error("cannot perform a division by 0")]
    DivisionByZero,
    #[error("cannot perform a modulo by 0")]
    ModuloByZero,
    #[error("cannot evaluate an expression missing unknown '{0}'")]
    UnboundUnknown(char),
    #[error("expression nesting exceeds the depth limit of {limit}")]
    NestingTooDeep { limit: usize },
    #[error("'{0}' cannot be used as an unknown")]
    InvalidUnknown(char),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type ExprResult<T> = Result<T, ExprError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn excerpt_stops_at_previous_operator() {
        let src = chars("1+foo(2)");
        let err = ParseError::new(ParseErrorKind::UnknownFunction("foo".into()), &src, 4);
        assert_eq!(err.excerpt_start, 2);
        assert_eq!(err.excerpt, "foo(2)");
        assert_eq!(err.render(), "foo(2) ...\n  ^");
    }

    #[test]
    fn excerpt_is_clamped_to_source() {
        let src = chars("(2");
        let err = ParseError::new(ParseErrorKind::UnmatchedParenthesis, &src, 0);
        assert_eq!(err.excerpt, "(2");
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn parse_error_converts_into_expr_error() {
        let src = chars("x");
        let err: ExprError = ParseError::new(ParseErrorKind::InvalidValue, &src, 0).into();
        assert!(matches!(err, ExprError::Parse(_)));
        assert!(err.to_string().contains("cannot parse value"));
    }

    #[test]
    fn parse_errors_display_kind_offset_and_excerpt() {
        let src = chars("2+");
        let err = ParseError::new(ParseErrorKind::MissingOperand(Operator::Add), &src, 1);
        assert_eq!(err.kind.to_string(), "missing operand for operator '+'");
        assert_eq!(
            err.to_string(),
            "missing operand for operator '+' at offset 1 near '2+'"
        );
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }
}
