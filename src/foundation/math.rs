use crate::foundation::error::{AnimError, AnimResult};

/// Coefficients smaller than this are treated as zero when solving polynomials.
pub(crate) const POLY_EPS: f64 = 1e-12;

/// Real roots of `a t^2 + b t + c = 0`, falling back to the linear equation when `a` vanishes.
pub(crate) fn real_roots_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < POLY_EPS {
        if b.abs() < POLY_EPS {
            return Vec::new();
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    let sq = disc.sqrt();
    vec![(-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)]
}

/// Solve a tridiagonal system `lower[i] x[i-1] + diag[i] x[i] + upper[i] x[i+1] = rhs[i]`.
///
/// `lower[0]` and `upper[n-1]` are ignored. Right-hand sides are generic so the same solver
/// handles scalars and vectors (Thomas algorithm).
pub(crate) fn solve_tridiagonal<T>(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[T],
) -> AnimResult<Vec<T>>
where
    T: Copy + std::ops::Sub<Output = T> + std::ops::Mul<f64, Output = T>,
{
    let n = diag.len();
    if n == 0 || lower.len() != n || upper.len() != n || rhs.len() != n {
        return Err(AnimError::construction(
            "tridiagonal system needs matching, non-empty bands",
        ));
    }

    let mut c = vec![0.0; n];
    let mut d: Vec<T> = Vec::with_capacity(n);

    if diag[0].abs() < POLY_EPS {
        return Err(AnimError::construction("singular tridiagonal system"));
    }
    c[0] = upper[0] / diag[0];
    d.push(rhs[0] * (1.0 / diag[0]));

    for i in 1..n {
        let m = diag[i] - lower[i] * c[i - 1];
        if m.abs() < POLY_EPS {
            return Err(AnimError::construction("singular tridiagonal system"));
        }
        c[i] = upper[i] / m;
        let prev = d[i - 1];
        d.push((rhs[i] - prev * lower[i]) * (1.0 / m));
    }

    for i in (0..n - 1).rev() {
        let next = d[i + 1];
        d[i] = d[i] - next * c[i];
    }
    Ok(d)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
