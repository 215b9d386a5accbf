//! # Operator table
//!
//! The fixed set of infix/prefix/postfix operators. Each [`Operator`] maps to a static
//! [`OperatorRules`] entry holding its symbol, precedence, operand requirements and a pair of
//! pure functions: the numeric rule (two floats to a float) and the symbolic rule (two
//! polynomials to a polynomial, or `None` when the operation has no polynomial form).
//!
//! | op  | precedence | left      | right     |
//! |-----|------------|-----------|-----------|
//! | `+` | 0          | required  | required  |
//! | `-` | 0          | optional  | required  |
//! | `*` | 1          | required  | required  |
//! | `/` | 1          | required  | required  |
//! | `^` | 2          | required  | required  |
//! | `%` | 4          | required  | required  |
//! | `!` | 4          | required  | absent    |
use log::warn;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::symbolic::errors::{ExprError, ExprResult};
use crate::symbolic::monomial::Polynomial;
use crate::symbolic::numeric_primitives;
use crate::symbolic::symbolic_engine::Expression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    Fact,
}

pub struct OperatorRules {
    pub symbol: char,
    pub precedence: u8,
    pub needs_left: bool,
    pub needs_right: bool,
    pub numeric: fn(f64, f64) -> ExprResult<f64>,
    pub symbolic: fn(&Polynomial, &Polynomial) -> Option<Polynomial>,
}

static ADD: OperatorRules = OperatorRules {
    symbol: '+',
    precedence: 0,
    needs_left: true,
    needs_right: true,
    numeric: |l, r| Ok(l + r),
    symbolic: |l, r| Some(l.add(r)),
};

static SUB: OperatorRules = OperatorRules {
    symbol: '-',
    precedence: 0,
    needs_left: false,
    needs_right: true,
    numeric: |l, r| Ok(l - r),
    symbolic: |l, r| Some(l.sub(r)),
};

static MUL: OperatorRules = OperatorRules {
    symbol: '*',
    precedence: 1,
    needs_left: true,
    needs_right: true,
    numeric: |l, r| Ok(l * r),
    symbolic: |l, r| Some(l.mul(r)),
};

static DIV: OperatorRules = OperatorRules {
    symbol: '/',
    precedence: 1,
    needs_left: true,
    needs_right: true,
    numeric: numeric_div,
    symbolic: |l, r| l.div(r),
};

static POW: OperatorRules = OperatorRules {
    symbol: '^',
    precedence: 2,
    needs_left: true,
    needs_right: true,
    numeric: |l, r| Ok(numeric_primitives::pow(l, r)),
    symbolic: |l, r| l.pow(r),
};

static MOD: OperatorRules = OperatorRules {
    symbol: '%',
    precedence: 4,
    needs_left: true,
    needs_right: true,
    numeric: numeric_mod,
    symbolic: |l, r| fold_constants(l, r, numeric_mod),
};

static FACT: OperatorRules = OperatorRules {
    symbol: '!',
    precedence: 4,
    needs_left: true,
    needs_right: false,
    numeric: numeric_fact,
    symbolic: |l, r| fold_constants(l, r, numeric_fact),
};

fn numeric_div(l: f64, r: f64) -> ExprResult<f64> {
    if r == 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    Ok(l / r)
}

fn numeric_mod(l: f64, r: f64) -> ExprResult<f64> {
    if r == 0.0 {
        return Err(ExprError::ModuloByZero);
    }
    Ok(numeric_primitives::modulo(l, r))
}

fn numeric_fact(l: f64, _r: f64) -> ExprResult<f64> {
    if !numeric_primitives::is_integer(l) || l < 0.0 {
        return Err(ExprError::Domain {
            what: "factorial".to_string(),
            value: l,
        });
    }
    Ok(numeric_primitives::fact(l as u64))
}

/// `%` and `!` only fold when both sides are constants and the numeric rule succeeds.
fn fold_constants(
    l: &Polynomial,
    r: &Polynomial,
    rule: fn(f64, f64) -> ExprResult<f64>,
) -> Option<Polynomial> {
    let value = rule(l.as_constant()?, r.as_constant()?).ok()?;
    Some(Polynomial::constant(value))
}

fn as_polynomial<'a>(side: &'a Option<Expression>, zero: &'a Polynomial) -> Option<&'a Polynomial> {
    match side {
        None => Some(zero),
        Some(Expression::Value(p)) => Some(p),
        Some(_) => None,
    }
}

impl Operator {
    pub fn rules(self) -> &'static OperatorRules {
        match self {
            Operator::Add => &ADD,
            Operator::Sub => &SUB,
            Operator::Mul => &MUL,
            Operator::Div => &DIV,
            Operator::Pow => &POW,
            Operator::Mod => &MOD,
            Operator::Fact => &FACT,
        }
    }

    pub fn symbol(self) -> char {
        self.rules().symbol
    }

    pub fn precedence(self) -> u8 {
        self.rules().precedence
    }

    pub fn needs_left(self) -> bool {
        self.rules().needs_left
    }

    pub fn needs_right(self) -> bool {
        self.rules().needs_right
    }

    /// postfix operators take no right operand at all
    pub fn is_postfix(self) -> bool {
        !self.needs_right()
    }

    pub fn from_symbol(c: char) -> Option<Operator> {
        Operator::iter().find(|op| op.symbol() == c)
    }

    /// Numeric rule; an absent side has already been replaced by 0.
    pub fn apply_numeric(self, left: f64, right: f64) -> ExprResult<f64> {
        (self.rules().numeric)(left, right)
    }

    /// Symbolic rule. Folds into a polynomial when both sides are polynomials (a missing side
    /// counts as the zero polynomial) and the rule has a polynomial result; otherwise returns
    /// the operator node with the already simplified sides.
    pub fn apply_symbolic(self, left: Option<Expression>, right: Option<Expression>) -> Expression {
        let zero = Polynomial::zero();
        if let (Some(l), Some(r)) = (
            as_polynomial(&left, &zero),
            as_polynomial(&right, &zero),
        ) {
            if let Some(folded) = (self.rules().symbolic)(l, r) {
                return Expression::Value(folded);
            }
        }
        warn!("operator '{}' left unevaluated", self.symbol());
        Expression::Calculus {
            operator: self,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }
}
