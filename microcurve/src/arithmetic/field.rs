//! Prime field arithmetic

use super::{Reduction, Uint};
use subtle::{Choice, ConstantTimeLess};

/// Prime field `GF(p)`: the modulus paired with its reduction strategy.
///
/// Elements are plain [`Uint<N>`] values in `[0, p)`. All operations assume
/// reduced inputs and return reduced outputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrimeField<const N: usize> {
    modulus: Uint<N>,
    reduction: Reduction,
}

impl<const N: usize> PrimeField<N> {
    /// Field with the given odd prime modulus.
    pub const fn new(modulus: Uint<N>, reduction: Reduction) -> Self {
        Self { modulus, reduction }
    }

    /// The prime `p`.
    pub const fn modulus(&self) -> &Uint<N> {
        &self.modulus
    }

    /// Reduction strategy used by [`PrimeField::mul`] and
    /// [`PrimeField::square`].
    pub const fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Is `a` a canonical element (below `p`)?
    pub fn contains(&self, a: &Uint<N>) -> Choice {
        a.ct_lt(&self.modulus)
    }

    /// `a + b`
    pub fn add(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        a.add_mod(b, &self.modulus)
    }

    /// `a − b`
    pub fn sub(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        a.sub_mod(b, &self.modulus)
    }

    /// `−a`
    pub fn neg(&self, a: &Uint<N>) -> Uint<N> {
        a.neg_mod(&self.modulus)
    }

    /// `a / 2`
    pub fn half(&self, a: &Uint<N>) -> Uint<N> {
        a.half_mod(&self.modulus)
    }

    /// `a · b` using the curve-specific reduction.
    pub fn mul(&self, a: &Uint<N>, b: &Uint<N>) -> Uint<N> {
        self.reduction.reduce(&a.mul_wide(b), &self.modulus)
    }

    /// `a²` using the curve-specific reduction.
    pub fn square(&self, a: &Uint<N>) -> Uint<N> {
        self.reduction.reduce(&a.square_wide(), &self.modulus)
    }

    /// `a⁻¹`, or zero for zero.
    pub fn invert(&self, a: &Uint<N>) -> Uint<N> {
        a.inv_mod(&self.modulus)
    }

    /// `base^exp` by left-to-right square and multiply.
    ///
    /// Branches on the bits of `exp`, which must therefore be public.
    pub fn pow_vartime(&self, base: &Uint<N>, exp: &Uint<N>) -> Uint<N> {
        let mut result = Uint::ONE;
        for i in (0..exp.bits()).rev() {
            result = self.square(&result);
            if bool::from(exp.bit(i)) {
                result = self.mul(&result, base);
            }
        }
        result
    }

    /// A square root of `a`.
    ///
    /// `a` must be a quadratic residue: no check is made, and the result is
    /// meaningless otherwise. Callers recovering points from untrusted data
    /// should validate the resulting point. Runs in variable time.
    pub fn sqrt(&self, a: &Uint<N>) -> Uint<N> {
        if self.modulus.0[0] & 3 == 3 {
            // p ≡ 3 (mod 4): a^((p + 1) / 4)
            let (p_plus_one, _) = self.modulus.adc(&Uint::ONE);
            self.pow_vartime(a, &p_plus_one.shr(2))
        } else {
            self.sqrt_tonelli_shanks(a)
        }
    }

    fn sqrt_tonelli_shanks(&self, a: &Uint<N>) -> Uint<N> {
        if bool::from(a.is_zero()) {
            return Uint::ZERO;
        }

        let minus_one = self.modulus.sbb(&Uint::ONE).0;

        // p − 1 = q · 2^s with q odd
        let mut q = minus_one;
        let mut s = 0;
        while !bool::from(q.is_odd()) {
            q = q.shr1(0);
            s += 1;
        }

        // least non-residue, by Euler's criterion
        let euler = minus_one.shr1(0);
        let mut z = Uint::from_u32(2);
        while self.pow_vartime(&z, &euler) != minus_one {
            z = self.add(&z, &Uint::ONE);
        }

        let mut m = s;
        let mut c = self.pow_vartime(&z, &q);
        let mut t = self.pow_vartime(a, &q);
        let mut r = self.pow_vartime(a, &q.adc(&Uint::ONE).0.shr1(0));

        while t != Uint::ONE {
            let mut i = 0;
            let mut t2i = t;
            while t2i != Uint::ONE {
                t2i = self.square(&t2i);
                i += 1;
                if i == m {
                    // not a residue
                    return r;
                }
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = self.square(&b);
            }
            m = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }

        r
    }
}
