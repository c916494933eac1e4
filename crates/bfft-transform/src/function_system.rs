//! Blaschke functions and the cached per-level base-point/sample-point
//! system built from a sequence of them.

use std::cell::{Ref, RefCell};

use bfft_complex::Complex;

use crate::interpolation;

/// A single Möbius-type Blaschke factor `b_p(x) = (x^2 - p^2) / (1 - conj(p^2) x^2)`,
/// parameterized by a point `p` inside the unit disk.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlaschkeFunction {
    param: Complex,
}

impl BlaschkeFunction {
    /// Build the factor for parameter `param`.
    #[inline]
    #[must_use]
    pub const fn new(param: Complex) -> Self {
        Self { param }
    }

    /// The factor's parameter.
    #[inline]
    #[must_use]
    pub const fn param(&self) -> Complex {
        self.param
    }

    /// Evaluate `b_p(x)`.
    #[must_use]
    pub fn apply(&self, x: Complex) -> Complex {
        let p2 = self.param * self.param;
        (x * x - p2) / (Complex::ONE - p2.conj() * x * x)
    }

    /// The two square roots `r`, `-r` of `b_p(x) = y` solved for `x`, with
    /// `r` chosen as the branch whose real part is non-negative (so the
    /// pair is returned as `(non-negative-real branch, its negation)`).
    #[must_use]
    pub fn roots(&self, y: Complex) -> (Complex, Complex) {
        let p2 = self.param * self.param;
        let root = ((p2 + y) / (y.conj_mult(p2) + Complex::ONE)).sqrt();
        if root.real >= 0.0 {
            (root, -root)
        } else {
            (-root, root)
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Cache {
    base: Vec<Vec<Complex>>,
    base_ok: bool,
    lvl: usize,
    seed: Complex,
    samples: Vec<f64>,
    samples_ok: bool,
}

/// An ordered sequence of [`BlaschkeFunction`]s, indexed `0..len()`, with a
/// default factor (the identity-ish zero-parameter function) used for any
/// index beyond `len()`. Base points and sample points derived from the
/// sequence are memoized per `(level, seed)` and invalidated whenever the
/// parameters change.
#[derive(Clone, Debug, Default)]
pub struct FunctionSystem {
    functions: Vec<BlaschkeFunction>,
    default: BlaschkeFunction,
    cache: RefCell<Cache>,
}

impl FunctionSystem {
    /// An empty system: every level uses the zero-parameter default factor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a system from explicit per-level parameters.
    #[must_use]
    pub fn from_params(params: Vec<Complex>) -> Self {
        Self { functions: params.into_iter().map(BlaschkeFunction::new).collect(), ..Self::default() }
    }

    /// Number of explicitly parameterized levels (levels beyond this fall
    /// back to the default factor).
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no levels are explicitly parameterized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The factor for level `i`, falling back to the default if `i` is
    /// beyond the explicit range.
    #[must_use]
    pub fn at(&self, i: usize) -> BlaschkeFunction {
        self.functions.get(i).copied().unwrap_or(self.default)
    }

    /// The explicit parameters, in level order.
    #[must_use]
    pub fn function_params(&self) -> Vec<Complex> {
        self.functions.iter().map(BlaschkeFunction::param).collect()
    }

    /// Replace all explicit parameters, invalidating any cached base or
    /// sample points.
    pub fn set_functions(&mut self, params: Vec<Complex>) {
        self.functions = params.into_iter().map(BlaschkeFunction::new).collect();
        self.invalidate();
    }

    /// Set a single level's parameter, growing the explicit range if
    /// needed, and invalidate any cached base or sample points.
    pub fn set_function(&mut self, i: usize, param: Complex) {
        if i >= self.functions.len() {
            self.functions.resize(i + 1, self.default);
        }
        self.functions[i] = BlaschkeFunction::new(param);
        self.invalidate();
    }

    /// Set the fallback factor used beyond the explicit range.
    pub fn set_default(&mut self, param: Complex) {
        self.default = BlaschkeFunction::new(param);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        let mut cache = self.cache.borrow_mut();
        cache.base_ok = false;
        cache.samples_ok = false;
    }

    fn ensure_base_points(&self, n: usize, seed: Complex) {
        {
            let cache = self.cache.borrow();
            if cache.base_ok && cache.lvl == n && cache.seed == seed {
                return;
            }
        }
        let mut base: Vec<Vec<Complex>> = Vec::with_capacity(n + 1);
        base.push(vec![seed]);
        for i in (1..=n).rev() {
            let root_cnt = 1usize << (n - i + 1);
            let half = root_cnt / 2;
            let func = self.at(i - 1);
            let prev = base[n - i].clone();
            let mut level = vec![Complex::ZERO; root_cnt];
            for (j, &p) in prev.iter().enumerate() {
                let (r0, r1) = func.roots(p);
                level[j] = r0;
                level[j + half] = r1;
            }
            for x in &level {
                debug_assert!((x.abs() - 1.0).abs() < 1e-6, "base point must lie on the unit circle");
            }
            for j in 0..half.saturating_sub(1) {
                if (level[j] * level[j + 1].conj()).imag > 0.0 {
                    level.swap(j + 1, j + 1 + half);
                }
            }
            base.push(level);
        }

        tracing::trace!(level = n, ?seed, "recomputed base points");
        let mut cache = self.cache.borrow_mut();
        cache.base = base;
        cache.lvl = n;
        cache.seed = seed;
        cache.base_ok = true;
        cache.samples_ok = false;
    }

    /// Base points at every level `0..=n`, seeded from `seed` at level 0.
    #[must_use]
    pub fn base_points_by_level(&self, n: usize, seed: Complex) -> Ref<'_, Vec<Vec<Complex>>> {
        self.ensure_base_points(n, seed);
        Ref::map(self.cache.borrow(), |c| &c.base)
    }

    /// Base points at level `n` only.
    #[must_use]
    pub fn base_points(&self, n: usize, seed: Complex) -> Ref<'_, Vec<Complex>> {
        self.ensure_base_points(n, seed);
        Ref::map(self.cache.borrow(), |c| {
            c.base.last().expect("base points populated by ensure_base_points")
        })
    }

    /// Normalized angular sample positions derived from the level-`n` base
    /// points.
    #[must_use]
    pub fn sample_points(&self, n: usize, seed: Complex) -> Ref<'_, Vec<f64>> {
        self.ensure_base_points(n, seed);
        {
            let needs_samples = !self.cache.borrow().samples_ok;
            if needs_samples {
                let positions = {
                    let cache = self.cache.borrow();
                    interpolation::sample_positions_from_base(
                        cache.base.last().expect("base points populated by ensure_base_points"),
                    )
                };
                let mut cache = self.cache.borrow_mut();
                cache.samples = positions;
                cache.samples_ok = true;
            }
        }
        Ref::map(self.cache.borrow(), |c| &c.samples)
    }

    /// Compose `x` through levels `0..n` in order.
    #[must_use]
    pub fn eval(&self, n: usize, mut x: Complex) -> Complex {
        for i in 0..n {
            x = self.at(i).apply(x);
        }
        x
    }

    /// Binary-exponentiation style composition used for diagnostics: walks
    /// the same chain as [`Self::eval`] but also accumulates a running
    /// product gated by the bits of `n`.
    #[must_use]
    pub fn eval_any(&self, n: usize, mut x: Complex) -> Complex {
        let mut result = Complex::ONE;
        let mut i = 0usize;
        while (1usize << i) <= n.max(1) {
            if n & (1usize << i) != 0 {
                result = result * x;
            }
            x = self.at(i).apply(x);
            i += 1;
            if i > 63 {
                break;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_param_roots_are_plus_minus_sqrt() {
        let f = BlaschkeFunction::default();
        let (r0, r1) = f.roots(Complex::ONE);
        assert!((r0 + r1).abs() < 1e-12);
    }

    #[test]
    fn base_points_lie_on_unit_circle() {
        let fs = FunctionSystem::new();
        let base = fs.base_points(3, Complex::ONE);
        for p in base.iter() {
            assert!((p.abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn base_points_are_cached_until_params_change() {
        let mut fs = FunctionSystem::new();
        {
            let _ = fs.base_points(2, Complex::ONE);
        }
        fs.set_function(0, Complex::new(0.1, 0.0));
        let base_after = fs.base_points(2, Complex::ONE).clone();
        let expected = {
            let mut fresh = FunctionSystem::new();
            fresh.set_function(0, Complex::new(0.1, 0.0));
            fresh.base_points(2, Complex::ONE).clone()
        };
        for (a, b) in base_after.iter().zip(&expected) {
            assert!((*a - *b).abs() < 1e-9);
        }
    }

    #[test]
    fn eval_with_all_zero_params_is_identity_chain() {
        let fs = FunctionSystem::new();
        let x = Complex::new(0.3, 0.2);
        assert_eq!(fs.eval(0, x), x);
    }
}
