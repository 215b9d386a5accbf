//! Scalar primitives the evaluator calls into: powers, roots, logarithms, trigonometry,
//! factorial and the non-negative modulo. Thin wrappers over `f64` methods.

pub fn pow(base: f64, exp: f64) -> f64 {
    if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
        base.powi(exp as i32)
    } else {
        base.powf(exp)
    }
}

pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

pub fn ln(x: f64) -> f64 {
    x.ln()
}

/// logarithm of `x` in base `base`: ln(x) / ln(base)
pub fn log(x: f64, base: f64) -> f64 {
    ln(x) / ln(base)
}

pub fn sin(rad: f64) -> f64 {
    rad.sin()
}

pub fn cos(rad: f64) -> f64 {
    rad.cos()
}

/// n! for a non-negative integer n, as a float (overflows to +inf past 170!)
pub fn fact(n: u64) -> f64 {
    if n > 170 {
        return f64::INFINITY;
    }
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// modulo that never returns a negative number: `modulo(-4, 3) == 2`
pub fn modulo(f: f64, m: f64) -> f64 {
    let r = f % m;
    if r < 0.0 { r + m.abs() } else { r }
}

pub fn min(a: f64, b: f64) -> f64 {
    if a < b { a } else { b }
}

pub fn max(a: f64, b: f64) -> f64 {
    if a > b { a } else { b }
}

pub fn is_integer(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}
