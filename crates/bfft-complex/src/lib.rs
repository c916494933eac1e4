//! Complex number arithmetic for the Blaschke Fourier transform codec.
//!
//! `Complex` is a plain `(real, imag)` pair of `f64`s. Equality is the
//! derived bitwise comparison on both fields (no epsilon fuzzing) — callers
//! that need tolerance comparisons should compute [`Complex::abs`] of the
//! difference themselves.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A complex number `real + imag*i`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    /// Real part.
    pub real: f64,
    /// Imaginary part.
    pub imag: f64,
}

impl Complex {
    /// Zero.
    pub const ZERO: Self = Self { real: 0.0, imag: 0.0 };
    /// One.
    pub const ONE: Self = Self { real: 1.0, imag: 0.0 };

    /// Build `real + imag*i`.
    #[inline]
    #[must_use]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Build a purely real value.
    #[inline]
    #[must_use]
    pub const fn from_real(real: f64) -> Self {
        Self { real, imag: 0.0 }
    }

    /// `real^2 + imag^2`.
    #[inline]
    #[must_use]
    pub fn norm(self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    /// Euclidean magnitude.
    #[inline]
    #[must_use]
    pub fn abs(self) -> f64 {
        self.norm().sqrt()
    }

    /// Angle from the positive real axis, in `(-pi, pi]`.
    #[inline]
    #[must_use]
    pub fn angle(self) -> f64 {
        self.imag.atan2(self.real)
    }

    /// Complex conjugate.
    #[inline]
    #[must_use]
    pub const fn conj(self) -> Self {
        Self { real: self.real, imag: -self.imag }
    }

    /// `self * other.conj()`.
    #[inline]
    #[must_use]
    pub fn conj_mult(self, other: Self) -> Self {
        Self {
            real: self.real * other.real + self.imag * other.imag,
            imag: -self.real * other.imag + self.imag * other.real,
        }
    }

    /// Build `radius * (cos(angle) + i*sin(angle))`.
    #[inline]
    #[must_use]
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self { real: angle.cos(), imag: angle.sin() } * radius
    }

    /// Principal branch square root.
    ///
    /// The sign of the result's imaginary part matches the sign of `self`'s
    /// imaginary part (upper half-plane convention); `sqrt(0) == 0`.
    #[must_use]
    pub fn sqrt(self) -> Self {
        let r = self.abs();
        if r == 0.0 {
            return Self::ZERO;
        }
        let unit = self / r;
        let a = (((unit.real + 1.0) * 0.5).abs()).sqrt();
        let mut b = (((1.0 - unit.real) * 0.5).abs()).sqrt();
        if unit.imag < 0.0 {
            b = -b;
        }
        Self { real: a, imag: b } * r.sqrt()
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { real: self.real + rhs.real, imag: self.imag + rhs.imag }
    }
}

impl Sub for Complex {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { real: self.real - rhs.real, imag: self.imag - rhs.imag }
    }
}

impl Mul for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            real: self.real * rhs.real - self.imag * rhs.imag,
            imag: self.real * rhs.imag + self.imag * rhs.real,
        }
    }
}

impl Div for Complex {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.conj_mult(rhs) / rhs.norm()
    }
}

impl Neg for Complex {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self { real: -self.real, imag: -self.imag }
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Scalar (`f64`) variants — the reference implementation overloads these
// separately rather than going through a generic `Into<Complex>`, so we do
// the same: a real scalar only ever touches `real` on add/sub, but scales
// both components on mul/div.

impl Add<f64> for Complex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self { real: self.real + rhs, imag: self.imag }
    }
}

impl Sub<f64> for Complex {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f64) -> Self {
        Self { real: self.real - rhs, imag: self.imag }
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self { real: self.real * rhs, imag: self.imag * rhs }
    }
}

impl Div<f64> for Complex {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self { real: self.real / rhs, imag: self.imag / rhs }
    }
}

impl DivAssign<f64> for Complex {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl From<f64> for Complex {
    #[inline]
    fn from(real: f64) -> Self {
        Self::from_real(real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_matches_squaring() {
        let z = Complex::new(3.0, -4.0);
        let r = z.sqrt();
        let back = r * r;
        assert!((back.real - z.real).abs() < 1e-9);
        assert!((back.imag - z.imag).abs() < 1e-9);
    }

    #[test]
    fn sqrt_branch_matches_input_imag_sign() {
        let z = Complex::new(-1.0, 2.0);
        assert!(z.sqrt().imag >= 0.0);
        let z2 = Complex::new(-1.0, -2.0);
        assert!(z2.sqrt().imag <= 0.0);
    }

    #[test]
    fn sqrt_of_zero_is_zero() {
        assert_eq!(Complex::ZERO.sqrt(), Complex::ZERO);
    }

    #[test]
    fn conj_mult_matches_conj_then_mult() {
        let a = Complex::new(1.5, 2.5);
        let b = Complex::new(-0.5, 3.0);
        assert_eq!(a.conj_mult(b), a * b.conj());
    }

    #[test]
    fn polar_round_trips_abs_and_angle() {
        let z = Complex::polar(2.0, 0.75);
        assert!((z.abs() - 2.0).abs() < 1e-12);
        assert!((z.angle() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn division_is_inverse_of_multiplication() {
        let a = Complex::new(2.0, -1.0);
        let b = Complex::new(0.5, 0.25);
        let q = a / b;
        let back = q * b;
        assert!((back.real - a.real).abs() < 1e-9);
        assert!((back.imag - a.imag).abs() < 1e-9);
    }
}
