//! a module turns a String expression into an [`Expression`] tree
//!
//! The parser works recursively on half-open char ranges of the whitespace-stripped input:
//! 1) strip the parenthesis pairs wrapping the whole range;
//! 2) look for the top-level operator with the lowest precedence, the rightmost one on ties,
//!    and split the range around it;
//! 3) otherwise the range must be `name(arg, ...)`;
//! 4) otherwise it is a terminal value: `pi`, `e`, an allowed unknown or a decimal number.
//!
//! ```text
//!                  search recursion diagram
//!                "2*x^2+cos(x)-1"
//!                |  lowest, rightmost: '-'   |
//!                |  2*x^2+cos(x)   |   1     |
//!                |  lowest: '+'    |         |
//!                |  2*x^2 | cos(x) |         |
//!                |  '*'   |  function call   |
//!                |  2 |x^2|    x   |         |
//!                |    '^' |        |         |
//!                |   x | 2|        |         |
//! ```
//! Picking the rightmost operator among equals makes it the root, so `10-2-3` is `(10-2)-3`.
use log::{debug, trace};
use nom::{IResult, Parser, combinator::all_consuming, number::complete::recognize_float};
use std::f64::consts::{E, PI};

use crate::symbolic::errors::{ExprError, ExprResult, ParseError, ParseErrorKind};
use crate::symbolic::monomial::Polynomial;
use crate::symbolic::operators::Operator;
use crate::symbolic::symbolic_engine::Expression;
use crate::symbolic::symbolic_functions::Function;
use crate::symbolic::utils::{split_parameters, top_level_groups, trim_parentheses};

/// `[+-]? (digits ('.' digits?)? | '.' digits)`; the exponent form is not a literal here
fn number_literal(input: &str) -> IResult<&str, &str> {
    all_consuming(recognize_float).parse(input)
}

/// Parses a complete decimal literal, None if the token is anything else.
pub fn parse_number(token: &str) -> Option<f64> {
    let (_, literal) = number_literal(token).ok()?;
    if literal.len() != token.len() || literal.contains(['e', 'E']) {
        return None;
    }
    literal.parse::<f64>().ok()
}

/// Unknowns must be single letters that cannot be mistaken for the constant `e`.
pub fn validate_unknowns(unknowns: &[char]) -> ExprResult<()> {
    for &u in unknowns {
        if !u.is_alphabetic() || u == 'e' {
            return Err(ExprError::InvalidUnknown(u));
        }
    }
    Ok(())
}

pub struct ExpressionParser<'a> {
    source: Vec<char>,
    unknowns: &'a [char],
    max_depth: usize,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(text: &str, unknowns: &'a [char], max_depth: usize) -> Self {
        ExpressionParser {
            source: text.chars().filter(|c| !c.is_whitespace()).collect(),
            unknowns,
            max_depth,
        }
    }

    /// the input with whitespace removed; parse error offsets point into it
    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn parse(&self) -> ExprResult<Expression> {
        validate_unknowns(self.unknowns)?;
        debug!("parsing '{}' with unknowns {:?}", self.source(), self.unknowns);
        self.parse_range(0, self.source.len(), 0)
    }

    fn error(&self, kind: ParseErrorKind, offset: usize) -> ExprError {
        ExprError::Parse(ParseError::new(kind, &self.source, offset))
    }

    fn parse_range(&self, start: usize, end: usize, depth: usize) -> ExprResult<Expression> {
        if depth > self.max_depth {
            return Err(ExprError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        let (start, end) = trim_parentheses(&self.source, start, end)?;
        if start == end {
            return Err(self.error(ParseErrorKind::EmptyBody, start));
        }
        let groups = top_level_groups(&self.source, start, end)?;

        // a chain of equal-precedence operators is folded left to right; only its operands
        // sit one level deeper than the range
        let chain = self.find_lowest_chain(start, end, &groups);
        if let Some(&(first, _)) = chain.first() {
            let mut left = self.parse_operand(start, first, depth)?;
            for (k, &(pos, operator)) in chain.iter().enumerate() {
                let next = chain.get(k + 1).map_or(end, |&(p, _)| p);
                trace!(
                    "operator '{}' at {} splits [{}, {})",
                    operator.symbol(),
                    pos,
                    start,
                    next
                );
                let right = self.parse_operand(pos + 1, next, depth)?;
                let node = Expression::calculus(operator, left, right).map_err(|kind| {
                    let offset = match kind {
                        ParseErrorKind::UnexpectedOperand(_) => pos + 1,
                        _ => pos,
                    };
                    self.error(kind, offset)
                })?;
                left = Some(node);
            }
            return left.ok_or_else(|| self.error(ParseErrorKind::EmptyBody, start));
        }

        // name(arg, ...) spanning the whole range
        if let Some(&(open, close)) = groups.first() {
            if open > start && close + 1 == end {
                let name: String = self.source[start..open].iter().collect();
                let function = Function::from_name(&name)
                    .ok_or_else(|| self.error(ParseErrorKind::UnknownFunction(name), start))?;
                let args = split_parameters(&self.source, open + 1, close)?
                    .into_iter()
                    .map(|(a, b)| self.parse_range(a, b, depth + 1))
                    .collect::<ExprResult<Vec<Expression>>>()?;
                trace!("call of {} with {} argument(s)", function, args.len());
                return Ok(Expression::function(function, args));
            }
        }

        self.parse_value(start, end)
    }

    /// An operand ends right before `pos` unless `pos` opens the range or follows an operator
    /// that still waits for its right operand.
    fn has_left_operand(&self, start: usize, pos: usize) -> bool {
        if pos == start {
            return false;
        }
        let previous = self.source[pos - 1];
        match Operator::from_symbol(previous) {
            Some(op) => op.is_postfix(),
            None => previous != '(' && previous != ',',
        }
    }

    /// `None` for an empty range: an operand the operator may go without
    fn parse_operand(&self, start: usize, end: usize, depth: usize) -> ExprResult<Option<Expression>> {
        if start == end {
            return Ok(None);
        }
        Ok(Some(self.parse_range(start, end, depth + 1)?))
    }

    /// Every accepted top-level operator of the lowest precedence found, in source order.
    fn find_lowest_chain(
        &self,
        start: usize,
        end: usize,
        groups: &[(usize, usize)],
    ) -> Vec<(usize, Operator)> {
        let mut chain: Vec<(usize, Operator)> = Vec::new();
        let mut i = start;
        while i < end {
            if let Some(&(_, close)) = groups.iter().find(|(open, _)| *open == i) {
                i = close + 1;
                continue;
            }
            if let Some(op) = Operator::from_symbol(self.source[i]) {
                let accepted = self.has_left_operand(start, i) || (!op.needs_left() && i == start);
                if accepted {
                    match chain.first().map(|(_, lowest)| lowest.precedence()) {
                        Some(lowest) if op.precedence() > lowest => {}
                        Some(lowest) if op.precedence() == lowest => chain.push((i, op)),
                        _ => chain = vec![(i, op)],
                    }
                }
            }
            i += 1;
        }
        chain
    }

    fn parse_value(&self, start: usize, end: usize) -> ExprResult<Expression> {
        let token: String = self.source[start..end].iter().collect();
        let value = match token.as_str() {
            "pi" => Polynomial::constant(PI),
            "e" => Polynomial::constant(E),
            _ if end - start == 1 && self.unknowns.contains(&self.source[start]) => {
                Polynomial::unknown(self.source[start])
            }
            _ => match parse_number(&token) {
                Some(number) => Polynomial::constant(number),
                None => return Err(self.error(ParseErrorKind::InvalidValue, start)),
            },
        };
        Ok(Expression::Value(value))
    }
}

/// Parses `text` with the given single-char unknowns and nesting limit.
pub fn parse_expression(text: &str, unknowns: &[char], max_depth: usize) -> ExprResult<Expression> {
    ExpressionParser::new(text, unknowns, max_depth).parse()
}
