//! # Monomials and polynomials
//!
//! Canonical "sum of monomials" form used by symbolic evaluation.
//!
//! - [`Monomial`]: a float coefficient times a product of unknown powers. Every unknown appears
//!   at most once (exponents of a repeated unknown are summed, zero exponents are dropped) and
//!   the unknowns are kept sorted by symbol.
//! - [`Polynomial`]: a list of monomials where no two monomials share the same unknown-exponent
//!   set. Building a polynomial always "packs" it: structurally identical monomials are merged by
//!   summing their coefficients and zero-coefficient monomials are removed, so the zero
//!   polynomial has no monomials at all.
//!
//! Both types are immutable values: every operation returns a new, packed value.
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::symbolic::errors::{ExprError, ExprResult};
use crate::symbolic::numeric_primitives;

#[derive(Clone, Debug, PartialEq)]
pub struct Monomial {
    coefficient: f64,
    unknowns: Vec<(char, f64)>,
}

impl Monomial {
    /// packs the unknown list: sorted by symbol, one entry per symbol, no zero exponent
    pub fn new(coefficient: f64, unknowns: Vec<(char, f64)>) -> Monomial {
        let mut packed: Vec<(char, f64)> = Vec::with_capacity(unknowns.len());
        for (symbol, exponent) in unknowns {
            match packed.iter_mut().find(|(s, _)| *s == symbol) {
                Some(entry) => entry.1 += exponent,
                None => packed.push((symbol, exponent)),
            }
        }
        packed.retain(|(_, exponent)| *exponent != 0.0);
        packed.sort_by(|a, b| a.0.cmp(&b.0));
        Monomial {
            coefficient,
            unknowns: packed,
        }
    }

    pub fn constant(value: f64) -> Monomial {
        Monomial {
            coefficient: value,
            unknowns: Vec::new(),
        }
    }

    pub fn unknown(symbol: char) -> Monomial {
        Monomial {
            coefficient: 1.0,
            unknowns: vec![(symbol, 1.0)],
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn unknowns(&self) -> &[(char, f64)] {
        &self.unknowns
    }

    pub fn is_constant(&self) -> bool {
        self.unknowns.is_empty()
    }

    /// Two monomials can be merged iff they carry the same unknowns with the same exponents.
    pub fn same_unknowns(&self, other: &Monomial) -> bool {
        self.unknowns == other.unknowns
    }

    pub fn with_coefficient(&self, coefficient: f64) -> Monomial {
        Monomial {
            coefficient,
            unknowns: self.unknowns.clone(),
        }
    }

    pub fn negate(&self) -> Monomial {
        self.with_coefficient(-self.coefficient)
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let unknowns = self
            .unknowns
            .iter()
            .chain(other.unknowns.iter())
            .copied()
            .collect();
        Monomial::new(self.coefficient * other.coefficient, unknowns)
    }

    /// 1/m: inverted coefficient, every exponent negated
    pub fn reciprocal(&self) -> Monomial {
        Monomial {
            coefficient: 1.0 / self.coefficient,
            unknowns: self.unknowns.iter().map(|(s, e)| (*s, -e)).collect(),
        }
    }

    /// m^exponent for a numeric exponent
    pub fn powf(&self, exponent: f64) -> Monomial {
        Monomial::new(
            numeric_primitives::pow(self.coefficient, exponent),
            self.unknowns
                .iter()
                .map(|(s, e)| (*s, e * exponent))
                .collect(),
        )
    }

    /// replaces `symbol` by a constant, folding it into the coefficient
    pub fn substitute(&self, symbol: char, value: f64) -> Monomial {
        let mut coefficient = self.coefficient;
        let mut unknowns = Vec::with_capacity(self.unknowns.len());
        for (s, e) in &self.unknowns {
            if *s == symbol {
                coefficient *= numeric_primitives::pow(value, *e);
            } else {
                unknowns.push((*s, *e));
            }
        }
        Monomial {
            coefficient,
            unknowns,
        }
    }

    /// coefficient × Π binding(unknown)^exponent
    pub fn evaluate(&self, bindings: &HashMap<char, f64>) -> ExprResult<f64> {
        let mut value = self.coefficient;
        for (symbol, exponent) in &self.unknowns {
            let bound = bindings
                .get(symbol)
                .ok_or(ExprError::UnboundUnknown(*symbol))?;
            value *= numeric_primitives::pow(*bound, *exponent);
        }
        Ok(value)
    }

    /// Display order: higher degree unknowns first, constants last.
    fn canonical_cmp(&self, other: &Monomial) -> Ordering {
        match (self.is_constant(), other.is_constant()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => {}
        }
        for ((s1, e1), (s2, e2)) in self.unknowns.iter().zip(other.unknowns.iter()) {
            let ord = s1.cmp(s2).then_with(|| e2.total_cmp(e1));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.unknowns.len().cmp(&other.unknowns.len())
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.unknowns.is_empty() {
            return write!(f, "{}", self.coefficient);
        }
        if self.coefficient == -1.0 {
            write!(f, "-")?;
        } else if self.coefficient != 1.0 {
            write!(f, "{}*", self.coefficient)?;
        }
        let factors = self.unknowns.iter().map(|(symbol, exponent)| {
            if *exponent == 1.0 {
                symbol.to_string()
            } else {
                format!("{}^{}", symbol, exponent)
            }
        });
        write!(f, "{}", factors.format("*"))
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polynomial {
    monomials: Vec<Monomial>,
}

impl Polynomial {
    /// Builds a packed polynomial from any list of monomials.
    pub fn from_monomials<I: IntoIterator<Item = Monomial>>(monomials: I) -> Polynomial {
        let mut packed: Vec<Monomial> = Vec::new();
        for monomial in monomials {
            match packed.iter_mut().find(|m| m.same_unknowns(&monomial)) {
                Some(existing) => existing.coefficient += monomial.coefficient,
                None => packed.push(monomial),
            }
        }
        packed.retain(|m| m.coefficient != 0.0);
        packed.sort_by(|a, b| a.canonical_cmp(b));
        Polynomial { monomials: packed }
    }

    pub fn zero() -> Polynomial {
        Polynomial::default()
    }

    pub fn constant(value: f64) -> Polynomial {
        Polynomial::from_monomials([Monomial::constant(value)])
    }

    pub fn unknown(symbol: char) -> Polynomial {
        Polynomial::from_monomials([Monomial::unknown(symbol)])
    }

    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Some(value) when the polynomial carries no unknown (the zero polynomial is 0)
    pub fn as_constant(&self) -> Option<f64> {
        match self.monomials.as_slice() {
            [] => Some(0.0),
            [m] if m.is_constant() => Some(m.coefficient),
            _ => None,
        }
    }

    /// the monomial with the same unknown-exponent set as `monomial`, if any
    pub fn find_matching(&self, monomial: &Monomial) -> Option<&Monomial> {
        self.monomials.iter().find(|m| m.same_unknowns(monomial))
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        Polynomial::from_monomials(
            self.monomials
                .iter()
                .chain(other.monomials.iter())
                .cloned(),
        )
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        Polynomial::from_monomials(
            self.monomials
                .iter()
                .cloned()
                .chain(other.monomials.iter().map(Monomial::negate)),
        )
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        Polynomial::from_monomials(
            self.monomials
                .iter()
                .cartesian_product(other.monomials.iter())
                .map(|(l, r)| l.mul(r)),
        )
    }

    /// Exact division, or None when the quotient has no polynomial form:
    /// - by a single monomial: multiplication by its reciprocal;
    /// - by a polynomial of the same length whose every monomial matches one of ours
    ///   with the same coefficient ratio: that constant ratio.
    pub fn div(&self, other: &Polynomial) -> Option<Polynomial> {
        if let [single] = other.monomials.as_slice() {
            return Some(self.mul(&Polynomial {
                monomials: vec![single.reciprocal()],
            }));
        }
        if other.is_zero() || other.len() != self.len() {
            return None;
        }
        let mut ratio: Option<f64> = None;
        for rm in &other.monomials {
            let lm = self.find_matching(rm)?;
            let r = lm.coefficient / rm.coefficient;
            match ratio {
                Some(previous) if previous != r => return None,
                _ => ratio = Some(r),
            }
        }
        ratio.map(Polynomial::constant)
    }

    /// Power by a constant exponent of a single-monomial base, None otherwise.
    pub fn pow(&self, exponent: &Polynomial) -> Option<Polynomial> {
        let exponent = exponent.as_constant()?;
        let base = match self.monomials.as_slice() {
            [] => Monomial::constant(0.0),
            [m] => m.clone(),
            _ => return None,
        };
        Some(Polynomial::from_monomials([base.powf(exponent)]))
    }

    pub fn substitute(&self, symbol: char, value: f64) -> Polynomial {
        Polynomial::from_monomials(self.monomials.iter().map(|m| m.substitute(symbol, value)))
    }

    pub fn unknowns(&self) -> impl Iterator<Item = char> + '_ {
        self.monomials
            .iter()
            .flat_map(|m| m.unknowns.iter().map(|(s, _)| *s))
    }

    pub fn evaluate(&self, bindings: &HashMap<char, f64>) -> ExprResult<f64> {
        let mut value = 0.0;
        for monomial in &self.monomials {
            value += monomial.evaluate(bindings)?;
        }
        Ok(value)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.monomials.is_empty() {
            return write!(f, "0");
        }
        let wrap = self.monomials.len() > 1;
        if wrap {
            write!(f, "(")?;
        }
        for (i, monomial) in self.monomials.iter().enumerate() {
            if i > 0 && !monomial.coefficient.is_sign_negative() {
                write!(f, "+")?;
            }
            write!(f, "{}", monomial)?;
        }
        if wrap {
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(c: f64, u: &[(char, f64)]) -> Monomial {
        Monomial::new(c, u.to_vec())
    }

    #[test]
    fn test_monomial_packing_merges_repeated_unknowns() {
        let mono = m(2.0, &[('y', 1.0), ('x', 2.0), ('y', 2.0)]);
        assert_eq!(mono.unknowns(), &[('x', 2.0), ('y', 3.0)]);
        let cancelled = m(1.0, &[('x', 1.0), ('x', -1.0)]);
        assert!(cancelled.is_constant());
    }

    #[test]
    fn test_polynomial_packing_merges_and_drops_zero() {
        let p = Polynomial::from_monomials([
            m(1.0, &[('x', 1.0)]),
            m(3.0, &[]),
            m(2.0, &[('x', 1.0)]),
            m(-3.0, &[]),
        ]);
        assert_eq!(p.monomials(), &[m(3.0, &[('x', 1.0)])]);
        assert!(Polynomial::constant(0.0).is_zero());
    }

    #[test]
    fn test_exponent_difference_keeps_monomials_apart() {
        let p = Polynomial::from_monomials([m(1.0, &[('x', 1.0)]), m(1.0, &[('x', 2.0)])]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.to_string(), "(x^2+x)");
    }

    #[test]
    fn test_mul_is_cartesian_product() {
        // (x+1)(x-1) = x^2 - 1
        let a = Polynomial::unknown('x').add(&Polynomial::constant(1.0));
        let b = Polynomial::unknown('x').sub(&Polynomial::constant(1.0));
        let prod = a.mul(&b);
        assert_eq!(
            prod,
            Polynomial::from_monomials([m(1.0, &[('x', 2.0)]), m(-1.0, &[])])
        );
    }

    #[test]
    fn test_div_by_single_monomial_and_by_ratio() {
        let x = Polynomial::unknown('x');
        let y = Polynomial::unknown('y');
        let two_x_four_y = x
            .mul(&Polynomial::constant(2.0))
            .add(&y.mul(&Polynomial::constant(4.0)));
        let halved = two_x_four_y.div(&Polynomial::constant(2.0)).unwrap();
        assert_eq!(halved, x.add(&y.mul(&Polynomial::constant(2.0))));
        assert_eq!(two_x_four_y.div(&halved), Some(Polynomial::constant(2.0)));
        let x_plus_1 = x.add(&Polynomial::constant(1.0));
        assert_eq!(two_x_four_y.div(&x_plus_1), None);
        assert_eq!(x.div(&Polynomial::zero()), None);
    }

    #[test]
    fn test_pow_of_single_monomial() {
        let base = Polynomial::from_monomials([m(2.0, &[('x', 1.0)])]);
        let squared = base.pow(&Polynomial::constant(2.0)).unwrap();
        assert_eq!(squared.monomials(), &[m(4.0, &[('x', 2.0)])]);
        assert_eq!(base.pow(&Polynomial::unknown('y')), None);
        assert_eq!(
            base.add(&Polynomial::constant(1.0)).pow(&Polynomial::constant(2.0)),
            None
        );
    }

    #[test]
    fn test_display() {
        let p = Polynomial::from_monomials([
            m(-2.0, &[('y', 1.0)]),
            m(1.0, &[('x', 1.0)]),
            m(0.5, &[]),
        ]);
        assert_eq!(p.to_string(), "(x-2*y+0.5)");
        assert_eq!(m(-1.0, &[('x', -1.0)]).to_string(), "-x^-1");
        assert_eq!(Polynomial::zero().to_string(), "0");
    }

    #[test]
    fn test_evaluate_is_product_of_powers() {
        let mut bindings = HashMap::new();
        bindings.insert('x', 2.0);
        bindings.insert('y', 3.0);
        let mono = m(2.0, &[('x', 2.0), ('y', 1.0)]);
        assert_eq!(mono.evaluate(&bindings), Ok(24.0));
        assert_eq!(
            m(1.0, &[('z', 1.0)]).evaluate(&bindings),
            Err(ExprError::UnboundUnknown('z'))
        );
    }
}
