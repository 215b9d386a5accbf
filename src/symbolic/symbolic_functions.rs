//! # Function table
//!
//! Named functions callable as `name(arg, ...)`. Arity and domain are only checked when a
//! call is evaluated numerically; parsing accepts any argument count.
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::symbolic::errors::{ExprError, ExprResult};
use crate::symbolic::numeric_primitives;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Cos,
    Sin,
    Tan,
    /// natural logarithm
    Ln,
    /// `log(x, base)`
    Log,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Function> {
        Function::from_str(name).ok()
    }

    pub fn name(&self) -> &str {
        self.as_ref()
    }

    pub fn arity(&self) -> usize {
        match self {
            Function::Log => 2,
            _ => 1,
        }
    }

    fn domain_error(&self, value: f64) -> ExprError {
        ExprError::Domain {
            what: self.name().to_string(),
            value,
        }
    }

    /// Checks the argument count, then the argument domain, then applies the function.
    pub fn evaluate(&self, args: &[f64]) -> ExprResult<f64> {
        if args.len() != self.arity() {
            return Err(ExprError::Arity {
                function: self.name().to_string(),
                expected: self.arity(),
                found: args.len(),
            });
        }
        match self {
            Function::Cos => Ok(numeric_primitives::cos(args[0])),
            Function::Sin => Ok(numeric_primitives::sin(args[0])),
            Function::Tan => {
                let cos = numeric_primitives::cos(args[0]);
                if cos == 0.0 {
                    return Err(self.domain_error(args[0]));
                }
                Ok(numeric_primitives::sin(args[0]) / cos)
            }
            Function::Ln => {
                if args[0] <= 0.0 {
                    return Err(self.domain_error(args[0]));
                }
                Ok(numeric_primitives::ln(args[0]))
            }
            Function::Log => {
                for &arg in args {
                    if arg <= 0.0 {
                        return Err(self.domain_error(arg));
                    }
                }
                // base 1 has ln == 0
                if args[1] == 1.0 {
                    return Err(self.domain_error(args[1]));
                }
                Ok(numeric_primitives::log(args[0], args[1]))
            }
        }
    }
}
