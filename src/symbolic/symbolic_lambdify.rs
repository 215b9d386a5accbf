//! # Numeric evaluation
//!
//! - `evaluate(&bindings)` walks the tree once with a map of unknown values.
//! - `lambdify(&unknowns)` compiles the tree into a [`Lambda`] whose unknowns are resolved
//!   to argument positions once, then returns it as a thread-safe closure over `&[f64]`.
//! - `evaluate_batch(&[bindings])` evaluates one tree against many bindings in parallel.
//!
//! An absent operand (unary minus, factorial) counts as 0 for the operator's numeric rule.
use log::debug;
use rayon::prelude::*;

use crate::symbolic::engine_config::HARD_DEPTH_LIMIT;
use crate::symbolic::errors::{ExprError, ExprResult};
use crate::symbolic::numeric_primitives;
use crate::symbolic::operators::Operator;
use crate::symbolic::symbolic_engine::{Bindings, Expression};
use crate::symbolic::symbolic_functions::Function;

fn too_deep() -> ExprError {
    ExprError::NestingTooDeep {
        limit: HARD_DEPTH_LIMIT,
    }
}

impl Expression {
    /// Numeric value of the tree for the given unknown values.
    ///
    /// # Examples
    /// ```
    /// use RustedExpressions::bindings;
    /// use RustedExpressions::symbolic::symbolic_engine::Expression;
    /// let expr = Expression::parse("x^2 + 1", &['x']).unwrap();
    /// assert_eq!(expr.evaluate(&bindings!('x' => 3)).unwrap(), 10.0);
    /// ```
    pub fn evaluate(&self, bindings: &Bindings) -> ExprResult<f64> {
        debug!("numeric evaluation of {} with {:?}", self, bindings);
        self.evaluate_at(bindings, 0)
    }

    fn evaluate_at(&self, bindings: &Bindings, depth: usize) -> ExprResult<f64> {
        if depth > HARD_DEPTH_LIMIT {
            return Err(too_deep());
        }
        match self {
            Expression::Value(p) => p.evaluate(bindings),
            Expression::Function { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate_at(bindings, depth + 1))
                    .collect::<ExprResult<Vec<f64>>>()?;
                function.evaluate(&values)
            }
            Expression::Calculus {
                operator,
                left,
                right,
            } => {
                let l = match left {
                    Some(l) => l.evaluate_at(bindings, depth + 1)?,
                    None => 0.0,
                };
                let r = match right {
                    Some(r) => r.evaluate_at(bindings, depth + 1)?,
                    None => 0.0,
                };
                operator.apply_numeric(l, r)
            }
        }
    }

    /// Evaluates the tree for every bindings map, in parallel; results keep the input order.
    pub fn evaluate_batch(&self, batch: &[Bindings]) -> Vec<ExprResult<f64>> {
        debug!("batch evaluation of {} over {} bindings", self, batch.len());
        batch
            .par_iter()
            .map(|bindings| self.evaluate_at(bindings, 0))
            .collect()
    }

    /// Compiles the tree into a [`Lambda`]; `unknowns[i]` is read from argument `i`.
    /// Fails with `UnboundUnknown` when the tree uses an unknown not listed.
    pub fn compile(&self, unknowns: &[char]) -> ExprResult<Lambda> {
        self.compile_at(unknowns, 0)
    }

    fn compile_at(&self, unknowns: &[char], depth: usize) -> ExprResult<Lambda> {
        if depth > HARD_DEPTH_LIMIT {
            return Err(too_deep());
        }
        match self {
            Expression::Value(p) => {
                let mut terms = Vec::with_capacity(p.len());
                for monomial in p.monomials() {
                    let mut powers = Vec::with_capacity(monomial.unknowns().len());
                    for (symbol, exponent) in monomial.unknowns() {
                        let index = unknowns
                            .iter()
                            .position(|u| u == symbol)
                            .ok_or(ExprError::UnboundUnknown(*symbol))?;
                        powers.push((index, *symbol, *exponent));
                    }
                    terms.push(Term {
                        coefficient: monomial.coefficient(),
                        powers,
                    });
                }
                Ok(Lambda::Polynomial(terms))
            }
            Expression::Function { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.compile_at(unknowns, depth + 1))
                    .collect::<ExprResult<Vec<Lambda>>>()?;
                Ok(Lambda::Call(*function, args))
            }
            Expression::Calculus {
                operator,
                left,
                right,
            } => {
                let left = match left {
                    Some(l) => Some(Box::new(l.compile_at(unknowns, depth + 1)?)),
                    None => None,
                };
                let right = match right {
                    Some(r) => Some(Box::new(r.compile_at(unknowns, depth + 1)?)),
                    None => None,
                };
                Ok(Lambda::Operation(*operator, left, right))
            }
        }
    }

    /// Turns the tree into a closure of the argument values listed in `unknowns` order.
    ///
    /// # Examples
    /// ```
    /// use RustedExpressions::symbolic::symbolic_engine::Expression;
    /// let expr = Expression::parse("x*y - 1", &['x', 'y']).unwrap();
    /// let f = expr.lambdify(&['x', 'y']).unwrap();
    /// assert_eq!(f(&[2.0, 3.0]).unwrap(), 5.0);
    /// ```
    pub fn lambdify(
        &self,
        unknowns: &[char],
    ) -> ExprResult<Box<dyn Fn(&[f64]) -> ExprResult<f64> + Send + Sync>> {
        let compiled = self.compile(unknowns)?;
        Ok(Box::new(move |args: &[f64]| compiled.eval(args)))
    }
}

/// `coefficient × Π args[index]^exponent`
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    coefficient: f64,
    powers: Vec<(usize, char, f64)>,
}

/// Expression tree with unknowns replaced by argument positions
#[derive(Clone, Debug, PartialEq)]
pub enum Lambda {
    Polynomial(Vec<Term>),
    Call(Function, Vec<Lambda>),
    Operation(Operator, Option<Box<Lambda>>, Option<Box<Lambda>>),
}

impl Lambda {
    /// A missing argument is reported as the unknown it stands for.
    pub fn eval(&self, args: &[f64]) -> ExprResult<f64> {
        match self {
            Lambda::Polynomial(terms) => {
                let mut sum = 0.0;
                for term in terms {
                    let mut value = term.coefficient;
                    for &(index, symbol, exponent) in &term.powers {
                        let arg = args.get(index).ok_or(ExprError::UnboundUnknown(symbol))?;
                        value *= numeric_primitives::pow(*arg, exponent);
                    }
                    sum += value;
                }
                Ok(sum)
            }
            Lambda::Call(function, lambdas) => {
                let values = lambdas
                    .iter()
                    .map(|l| l.eval(args))
                    .collect::<ExprResult<Vec<f64>>>()?;
                function.evaluate(&values)
            }
            Lambda::Operation(operator, left, right) => {
                let l = match left {
                    Some(l) => l.eval(args)?,
                    None => 0.0,
                };
                let r = match right {
                    Some(r) => r.eval(args)?,
                    None => 0.0,
                };
                operator.apply_numeric(l, r)
            }
        }
    }
}
