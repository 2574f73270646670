//! Modular arithmetic over an arbitrary odd modulus.
//!
//! These are the generic building blocks: scalar arithmetic modulo the curve
//! order always goes through them, and field arithmetic uses them for
//! everything except multiplication and squaring (see [`Reduction`]).
//!
//! [`Reduction`]: super::Reduction

use super::{Uint, WideUint};
use subtle::{Choice, ConditionallySelectable, ConstantTimeLess};

impl<const N: usize> Uint<N> {
    /// `(self + rhs) mod m`, for `self, rhs < m`.
    pub fn add_mod(&self, rhs: &Self, m: &Self) -> Self {
        let (sum, carry) = self.adc(rhs);
        let (reduced, borrow) = sum.sbb(m);

        // The unreduced sum is kept only if it did not overflow and is below m.
        let keep = !Choice::from(carry as u8) & Choice::from(borrow as u8);
        Self::conditional_select(&reduced, &sum, keep)
    }

    /// `(self - rhs) mod m`, for `self, rhs < m`.
    pub fn sub_mod(&self, rhs: &Self, m: &Self) -> Self {
        let (diff, borrow) = self.sbb(rhs);
        let correction = Self::conditional_select(&Self::ZERO, m, Choice::from(borrow as u8));
        diff.adc(&correction).0
    }

    /// `-self mod m`, for `self < m`.
    pub fn neg_mod(&self, m: &Self) -> Self {
        Self::ZERO.sub_mod(self, m)
    }

    /// `self / 2 mod m`, for odd `m` and `self < m`.
    pub fn half_mod(&self, m: &Self) -> Self {
        let addend = Self::conditional_select(&Self::ZERO, m, self.is_odd());
        let (sum, carry) = self.adc(&addend);
        sum.shr1(carry)
    }

    /// `(self * rhs) mod m` by long division.
    pub fn mul_mod(&self, rhs: &Self, m: &Self) -> Self {
        self.mul_wide(rhs).rem(m)
    }

    /// `self² mod m` by long division.
    pub fn square_mod(&self, m: &Self) -> Self {
        self.square_wide().rem(m)
    }

    /// `self⁻¹ mod m` for odd `m` and `self < m`; zero maps to zero.
    ///
    /// Binary extended GCD keeping `a ≡ u·self` and `b ≡ v·self`: when `a` is
    /// odd the smaller of `a`, `b` is subtracted from the larger (after a
    /// swap), then `a` is halved. Each step shortens `a` and `b` together by
    /// at least one bit, so `2·bits(m)` steps always reach `a = 0`. Every step
    /// does the same work whatever the value of `self`.
    pub fn inv_mod(&self, m: &Self) -> Self {
        debug_assert!(bool::from(m.is_odd()));

        let mut a = *self;
        let mut b = *m;
        let mut u = Self::ONE;
        let mut v = Self::ZERO;

        for _ in 0..(2 * m.bits()) {
            let odd = a.is_odd();
            let swap = odd & a.ct_lt(&b);
            Self::conditional_swap(&mut a, &mut b, swap);
            Self::conditional_swap(&mut u, &mut v, swap);

            let (diff, _) = a.sbb(&b);
            a.conditional_assign(&diff, odd);
            let u_diff = u.sub_mod(&v, m);
            u.conditional_assign(&u_diff, odd);

            a = a.shr1(0);
            u = u.half_mod(m);
        }

        v
    }
}

impl<const N: usize> WideUint<N> {
    /// `self mod modulus` by restoring binary long division: the modulus is
    /// shifted up to the top bit and conditionally subtracted once per bit
    /// position on the way back down.
    ///
    /// The iteration count depends only on the bit length of `modulus`.
    pub fn rem(&self, modulus: &Uint<N>) -> Uint<N> {
        debug_assert!(!bool::from(modulus.is_zero()));

        let shift = 2 * Uint::<N>::BITS - modulus.bits();
        let mut multiple = WideUint::shifted(modulus, shift);
        let mut value = *self;

        for _ in 0..=shift {
            let (diff, borrow) = value.sbb(&multiple);
            value.conditional_assign(&diff, !Choice::from(borrow as u8));
            multiple = multiple.shr1();
        }

        value.lo
    }
}
