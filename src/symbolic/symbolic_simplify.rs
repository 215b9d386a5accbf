//! # Symbolic evaluation
//!
//! Reduces an [`Expression`] toward a single packed [`Polynomial`] ("sum of monomials").
//!
//! The tree is walked post-order: function arguments and operator operands are simplified
//! first, then every operator node is handed to its symbolic rule (see `operators`).
//! A node folds into a `Value` when all of its simplified operands are polynomials and the
//! rule has a polynomial result; otherwise it is rebuilt with its simplified operands.
//!
//! Function calls are never folded: `cos(0)` stays `cos(0)` (its argument is simplified).
//! Evaluating an already evaluated tree returns an equal tree.
//!
//! ## Examples
//! - `x + x` → `2*x`
//! - `x * x` → `x^2`
//! - `(2*x + 4*y) / 2` → `(x+2*y)`
//! - `x / x^2` → `x^-1`
//! - `x % 2` → `x%2` (no polynomial form)
use log::debug;

use crate::symbolic::engine_config::HARD_DEPTH_LIMIT;
use crate::symbolic::errors::{ExprError, ExprResult};
use crate::symbolic::symbolic_engine::Expression;

impl Expression {
    /// Symbolic evaluation: a new tree where every foldable subtree is a packed polynomial.
    pub fn evaluate_symbolic(&self) -> ExprResult<Expression> {
        debug!("symbolic evaluation of {}", self);
        self.simplify_at(0)
    }

    fn simplify_at(&self, depth: usize) -> ExprResult<Expression> {
        if depth > HARD_DEPTH_LIMIT {
            return Err(ExprError::NestingTooDeep {
                limit: HARD_DEPTH_LIMIT,
            });
        }
        match self {
            Expression::Value(_) => Ok(self.clone()),
            Expression::Function { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.simplify_at(depth + 1))
                    .collect::<ExprResult<Vec<Expression>>>()?;
                Ok(Expression::function(*function, args))
            }
            Expression::Calculus {
                operator,
                left,
                right,
            } => {
                let left = match left {
                    Some(l) => Some(l.simplify_at(depth + 1)?),
                    None => None,
                };
                let right = match right {
                    Some(r) => Some(r.simplify_at(depth + 1)?),
                    None => None,
                };
                Ok(operator.apply_symbolic(left, right))
            }
        }
    }
}
