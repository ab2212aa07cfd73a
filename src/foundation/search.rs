//! Bracketed one-dimensional searches.
//!
//! Both searches shrink a bracket one step per [`Bisect::iterate`] / [`GoldenSection::iterate`]
//! call; `iterate_until` drives them until the bracket width drops below a threshold.

use crate::foundation::error::{AnimError, AnimResult};

/// Hard cap on iterations for `iterate_until`, keeps a non-shrinking bracket from looping.
pub const MAX_SEARCH_ITERATIONS: usize = 200;

/// Zero search by repeated halving of a sign-change bracket.
pub struct Bisect<F> {
    func: F,
    left: f64,
    right: f64,
    left_err: f64,
    right_err: f64,
    exact: Option<f64>,
    iterations: usize,
}

impl<F> Bisect<F>
where
    F: FnMut(f64) -> f64,
{
    /// Fails with [`AnimError::DegenerateBracket`] when `f(left)` and `f(right)` share a sign.
    pub fn new(mut func: F, left: f64, right: f64) -> AnimResult<Self> {
        let left_err = func(left);
        let right_err = func(right);
        if left_err * right_err > 0.0 {
            return Err(AnimError::degenerate_bracket(format!(
                "f({left}) = {left_err} and f({right}) = {right_err} do not bracket a zero"
            )));
        }
        let exact = if left_err == 0.0 {
            Some(left)
        } else if right_err == 0.0 {
            Some(right)
        } else {
            None
        };
        Ok(Self {
            func,
            left,
            right,
            left_err,
            right_err,
            exact,
            iterations: 0,
        })
    }

    /// Halve the bracket once.
    pub fn iterate(&mut self) -> AnimResult<()> {
        if self.exact.is_some() {
            return Ok(());
        }
        let mid = 0.5 * (self.left + self.right);
        let mid_err = (self.func)(mid);
        if mid_err == 0.0 {
            self.exact = Some(mid);
        } else if self.left_err * mid_err > 0.0 {
            self.left = mid;
            self.left_err = mid_err;
        } else if self.right_err * mid_err > 0.0 {
            self.right = mid;
            self.right_err = mid_err;
        } else {
            return Err(AnimError::degenerate_bracket(format!(
                "bracket [{}, {}] lost its zero at {mid}",
                self.left, self.right
            )));
        }
        self.iterations += 1;
        Ok(())
    }

    /// Bracket end with the smaller residual.
    pub fn parameter(&self) -> f64 {
        if let Some(x) = self.exact {
            return x;
        }
        if self.left_err.abs() < self.right_err.abs() {
            self.left
        } else {
            self.right
        }
    }

    /// Current bracket width.
    pub fn perror(&self) -> f64 {
        if self.exact.is_some() {
            0.0
        } else {
            (self.right - self.left).abs()
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Iterate until the bracket is narrower than `threshold`.
    pub fn iterate_until(&mut self, threshold: f64) -> AnimResult<f64> {
        while self.perror() > threshold && self.iterations < MAX_SEARCH_ITERATIONS {
            self.iterate()?;
        }
        Ok(self.parameter())
    }
}

/// Minimum search that narrows a bracket by the golden ratio each step.
pub struct GoldenSection<F> {
    func: F,
    a: f64,
    b1: f64,
    b2: f64,
    c: f64,
    f_b1: f64,
    f_b2: f64,
    iterations: usize,
}

const GOLD: f64 = 0.381_966_011_250_105_1; // (3 - sqrt 5) / 2

impl<F> GoldenSection<F>
where
    F: FnMut(f64) -> f64,
{
    /// Fails with [`AnimError::DegenerateBracket`] unless both interior probes lie below both
    /// bracket values.
    pub fn new(mut func: F, left: f64, right: f64) -> AnimResult<Self> {
        let b1 = left + GOLD * (right - left);
        let b2 = left + (1.0 - GOLD) * (right - left);
        let f_a = func(left);
        let f_b1 = func(b1);
        let f_b2 = func(b2);
        let f_c = func(right);
        if f_b1 > f_a || f_b1 > f_c || f_b2 > f_a || f_b2 > f_c {
            return Err(AnimError::degenerate_bracket(format!(
                "[{left}, {right}] does not bracket a minimum"
            )));
        }
        Ok(Self {
            func,
            a: left,
            b1,
            b2,
            c: right,
            f_b1,
            f_b2,
            iterations: 0,
        })
    }

    pub fn iterate(&mut self) {
        if self.f_b1 > self.f_b2 {
            self.a = self.b1;
            self.b1 = self.b2;
            self.f_b1 = self.f_b2;
            self.b2 = self.a + (1.0 - GOLD) * (self.c - self.a);
            self.f_b2 = (self.func)(self.b2);
        } else {
            self.c = self.b2;
            self.b2 = self.b1;
            self.f_b2 = self.f_b1;
            self.b1 = self.a + GOLD * (self.c - self.a);
            self.f_b1 = (self.func)(self.b1);
        }
        self.iterations += 1;
    }

    /// Interior probe with the lower value.
    pub fn parameter(&self) -> f64 {
        if self.f_b1 < self.f_b2 {
            self.b1
        } else {
            self.b2
        }
    }

    /// Distance from the best probe to its outer bracket.
    pub fn perror(&self) -> f64 {
        if self.f_b1 < self.f_b2 {
            (self.b1 - self.a).abs()
        } else {
            (self.c - self.b2).abs()
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn iterate_until(&mut self, threshold: f64) -> f64 {
        while self.perror() > threshold && self.iterations < MAX_SEARCH_ITERATIONS {
            self.iterate();
        }
        self.parameter()
    }
}

/// Bisect `f` on `[lo, hi]` for at most `max_iter` halvings.
pub fn bisect_root<F>(f: F, lo: f64, hi: f64, max_iter: usize) -> AnimResult<f64>
where
    F: FnMut(f64) -> f64,
{
    let mut search = Bisect::new(f, lo, hi)?;
    for _ in 0..max_iter {
        if search.perror() == 0.0 {
            break;
        }
        search.iterate()?;
    }
    Ok(search.parameter())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/search.rs"]
mod tests;
