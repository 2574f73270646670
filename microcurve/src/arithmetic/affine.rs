//! Affine points

use super::{PrimeField, Uint};
use crate::CurveParams;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A point in affine coordinates on a curve over a field of `N` words.
///
/// The point at infinity is represented as `(0, 0)`, which lies on none of
/// the supported curves.
#[derive(Clone, Copy, Debug)]
#[allow(missing_docs)]
pub struct AffinePoint<const N: usize> {
    pub x: Uint<N>,
    pub y: Uint<N>,
}

impl<const N: usize> AffinePoint<N> {
    /// The identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self::new(Uint::ZERO, Uint::ZERO);

    /// Create a point from its coordinates, without checking it.
    pub const fn new(x: Uint<N>, y: Uint<N>) -> Self {
        Self { x, y }
    }

    /// Returns the identity of the group: the point at infinity.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.is_zero()
    }

    /// `−P`
    pub fn negate(&self, field: &PrimeField<N>) -> Self {
        Self {
            x: self.x,
            y: field.neg(&self.y),
        }
    }

    /// Recover a point from its `x` coordinate and the parity of `y`.
    ///
    /// `x` must be below `p`. No check is made that `x` belongs to a point on
    /// the curve; when it does not, the result is not on the curve either.
    pub fn decompress<const S: usize>(
        curve: &CurveParams<N, S>,
        x: &Uint<N>,
        y_is_odd: Choice,
    ) -> Self {
        let field = curve.field();
        let beta = field.sqrt(&curve.x_side(x));
        let y = Uint::conditional_select(&field.neg(&beta), &beta, beta.is_odd().ct_eq(&y_is_odd));

        Self { x: *x, y }
    }
}

impl<const N: usize> ConditionallySelectable for AffinePoint<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Uint::conditional_select(&a.x, &b.x, choice),
            y: Uint::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl<const N: usize> ConstantTimeEq for AffinePoint<N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl<const N: usize> Default for AffinePoint<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> PartialEq for AffinePoint<N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const N: usize> Eq for AffinePoint<N> {}

#[cfg(feature = "zeroize")]
impl<const N: usize> Zeroize for AffinePoint<N> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}
