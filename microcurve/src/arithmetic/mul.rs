//! Scalar multiplication and affine group operations.

use super::{
    jacobian::{self, CoZPoint},
    AffinePoint, Uint,
};
use crate::CurveParams;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

impl<const N: usize, const S: usize> CurveParams<N, S> {
    /// `scalar · point` with the co-Z Montgomery ladder.
    ///
    /// Bit `num_bits − 1` of `scalar` is taken to be set (the ladder starts
    /// from `(2P, P)`); bits `num_bits − 2` down to `0` are processed with one
    /// conjugate addition and one addition each. The only secret-dependent
    /// choice is which register plays which role, made with constant-time
    /// swaps. A single inversion converts the result back to affine form.
    ///
    /// `initial_z`, if given, must be non-zero; it randomizes the starting
    /// projective representation. `num_bits` must be at least 2 and `point`
    /// must be a valid point with non-zero `x`.
    ///
    /// Prefer [`CurveParams::mul_secret`], which pads the scalar so the ladder
    /// length does not depend on it.
    pub fn mul_point(
        &self,
        point: &AffinePoint<N>,
        scalar: &Uint<S>,
        num_bits: usize,
        initial_z: Option<&Uint<N>>,
    ) -> AffinePoint<N> {
        debug_assert!(num_bits >= 2);
        let f = self.field();

        let mut r1 = CoZPoint {
            x: point.x,
            y: point.y,
        };
        let mut r0 = CoZPoint::default();
        jacobian::initial_double(f, self.a(), &mut r1, &mut r0, initial_z);

        for i in (1..num_bits - 1).rev() {
            let nb = !scalar.bit(i);
            CoZPoint::conditional_swap(&mut r0, &mut r1, nb);
            jacobian::add_conjugate(f, &mut r1, &mut r0);
            jacobian::add(f, &mut r0, &mut r1);
            CoZPoint::conditional_swap(&mut r0, &mut r1, nb);
        }

        let nb = !scalar.bit(0);
        CoZPoint::conditional_swap(&mut r0, &mut r1, nb);
        jacobian::add_conjugate(f, &mut r1, &mut r0);
        CoZPoint::conditional_swap(&mut r0, &mut r1, nb);

        // Recover 1/Z from the known affine point: z = yP·Xb / (xP·Yb·(X1 − X0))
        let rb = CoZPoint::conditional_select(&r1, &r0, nb);
        let mut z = f.sub(&r1.x, &r0.x);
        z = f.mul(&z, &rb.y);
        z = f.mul(&z, &point.x);
        z = f.invert(&z);
        z = f.mul(&z, &point.y);
        z = f.mul(&z, &rb.x);

        CoZPoint::conditional_swap(&mut r0, &mut r1, nb);
        jacobian::add(f, &mut r0, &mut r1);
        CoZPoint::conditional_swap(&mut r0, &mut r1, nb);

        jacobian::apply_z(f, &mut r0.x, &mut r0.y, &z);
        AffinePoint::new(r0.x, r0.y)
    }

    /// `k + n` or `k + 2n`, whichever has bit `bits(n)` as its top bit.
    ///
    /// Either value represents the same multiple of any point in the
    /// group; padding to a fixed length keeps the ladder length independent
    /// of `k`. The choice is made in constant time.
    pub(crate) fn regularize(&self, k: &Uint<S>) -> Uint<S> {
        let n = self.order();
        let n_bits = self.order_bits();

        let (k0, overflow) = k.adc(n);
        let (k1, _) = k0.adc(n);

        let mut carry = Choice::from(overflow as u8);
        if n_bits < Uint::<S>::BITS {
            carry |= k0.bit(n_bits);
        }

        Uint::conditional_select(&k1, &k0, carry)
    }

    /// `scalar · point` for a secret `scalar` in `[1, n − 1]`, running the
    /// ladder over exactly `bits(n) + 1` bits.
    ///
    /// `point` is treated as public; only `scalar` is protected.
    pub fn mul_secret(
        &self,
        point: &AffinePoint<N>,
        scalar: &Uint<S>,
        initial_z: Option<&Uint<N>>,
    ) -> AffinePoint<N> {
        let k = self.regularize(scalar);
        let mut result = self.mul_point(point, &k, self.order_bits() + 1, initial_z);

        // The ladder hits an exceptional addition for k ∈ {1, n − 1, n − 2}.
        let f = self.field();
        let n = self.order();
        let n_minus_one = n.sbb(&Uint::ONE).0;
        let n_minus_two = n.sbb(&Uint::from_u32(2)).0;
        let neg = point.negate(f);
        let neg_twice = self.double_point(point).negate(f);
        result.conditional_assign(point, scalar.ct_eq(&Uint::ONE));
        result.conditional_assign(&neg, scalar.ct_eq(&n_minus_one));
        result.conditional_assign(&neg_twice, scalar.ct_eq(&n_minus_two));

        result
    }

    /// `scalar · G`
    pub fn mul_base(&self, scalar: &Uint<S>) -> AffinePoint<N> {
        self.mul_secret(self.generator(), scalar, None)
    }

    /// `P + Q`.
    ///
    /// Runs in variable time: use only on public points.
    pub fn add_points(&self, p: &AffinePoint<N>, q: &AffinePoint<N>) -> AffinePoint<N> {
        if bool::from(p.is_identity()) {
            return *q;
        }
        if bool::from(q.is_identity()) {
            return *p;
        }
        if p.x == q.x {
            return if p.y == q.y {
                self.double_point(p)
            } else {
                AffinePoint::IDENTITY
            };
        }

        let f = self.field();
        let mut p1 = CoZPoint { x: p.x, y: p.y };
        let mut p2 = CoZPoint { x: q.x, y: q.y };
        let z = f.sub(&q.x, &p.x);
        jacobian::add(f, &mut p1, &mut p2);
        jacobian::apply_z(f, &mut p2.x, &mut p2.y, &f.invert(&z));

        AffinePoint::new(p2.x, p2.y)
    }

    /// `2P`.
    ///
    /// Runs in variable time: use only on public points.
    pub fn double_point(&self, p: &AffinePoint<N>) -> AffinePoint<N> {
        if bool::from(p.is_identity() | p.y.is_zero()) {
            return AffinePoint::IDENTITY;
        }

        let f = self.field();
        let (mut x, mut y, mut z) = (p.x, p.y, Uint::ONE);
        jacobian::double(f, self.a(), &mut x, &mut y, &mut z);
        jacobian::apply_z(f, &mut x, &mut y, &f.invert(&z));

        AffinePoint::new(x, y)
    }

    /// `u1·G + u2·Q` by Shamir's trick over the table `{O, G, Q, G + Q}`.
    ///
    /// Runs in variable time and does not handle the exceptional case of an
    /// intermediate sum equal to the point being added; both are acceptable
    /// for signature verification, where all inputs are public and such
    /// collisions are negligibly unlikely. A result at infinity comes back as
    /// the identity.
    pub(crate) fn mul_double_vartime(
        &self,
        u1: &Uint<S>,
        u2: &Uint<S>,
        q: &AffinePoint<N>,
    ) -> AffinePoint<N> {
        let f = self.field();
        let g = self.generator();
        let sum = self.add_points(g, q);
        let table = [None, Some(g), Some(q), Some(&sum)];
        let index = |i: usize| {
            usize::from(u1.bit(i).unwrap_u8()) | usize::from(u2.bit(i).unwrap_u8()) << 1
        };

        let num_bits = u1.bits().max(u2.bits());
        if num_bits == 0 {
            return AffinePoint::IDENTITY;
        }

        let (mut rx, mut ry, mut z) = match table[index(num_bits - 1)] {
            Some(point) if !bool::from(point.is_identity()) => (point.x, point.y, Uint::ONE),
            _ => (Uint::ZERO, Uint::ZERO, Uint::ZERO),
        };

        for i in (0..num_bits - 1).rev() {
            jacobian::double(f, self.a(), &mut rx, &mut ry, &mut z);

            let point = match table[index(i)] {
                Some(point) if !bool::from(point.is_identity()) => point,
                _ => continue,
            };

            if bool::from(z.is_zero()) {
                // accumulator is at infinity
                rx = point.x;
                ry = point.y;
                z = Uint::ONE;
                continue;
            }

            let mut t = CoZPoint {
                x: point.x,
                y: point.y,
            };
            jacobian::apply_z(f, &mut t.x, &mut t.y, &z);
            let tz = f.sub(&rx, &t.x);
            let mut r = CoZPoint { x: rx, y: ry };
            jacobian::add(f, &mut t, &mut r);
            rx = r.x;
            ry = r.y;
            z = f.mul(&z, &tz);
        }

        if bool::from(z.is_zero()) {
            return AffinePoint::IDENTITY;
        }
        jacobian::apply_z(f, &mut rx, &mut ry, &f.invert(&z));
        AffinePoint::new(rx, ry)
    }
}

#[cfg(test)]
mod tests {
    use crate::arithmetic::{AffinePoint, Uint, WideUint};
    use crate::curves::*;
    use rand_core::{OsRng, RngCore};

    fn random_scalar<const N: usize, const S: usize>(curve: &CurveParams<N, S>) -> Uint<S> {
        loop {
            let mut words = [0; S];
            for word in words.iter_mut() {
                *word = OsRng.next_u32();
            }
            let k = WideUint::from(Uint::from_words(words)).rem(curve.order());
            if k != Uint::ZERO {
                return k;
            }
        }
    }

    fn group_law<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
        let g = curve.generator();

        // 1·G, 2·G, 3·G
        assert_eq!(curve.mul_base(&Uint::ONE), *g);
        let two_g = curve.double_point(g);
        assert_eq!(curve.mul_base(&Uint::from_u32(2)), two_g);
        assert_eq!(curve.mul_base(&Uint::from_u32(3)), curve.add_points(&two_g, g));

        // (n − 1)·G = −G
        let n_minus_one = curve.order().sbb(&Uint::ONE).0;
        assert_eq!(curve.mul_base(&n_minus_one), g.negate(curve.field()));

        // k1·G + k2·G = (k1 + k2)·G
        let k1 = random_scalar(curve);
        let k2 = random_scalar(curve);
        let sum = curve.scalar_add(&k1, &k2);
        let lhs = curve.add_points(&curve.mul_base(&k1), &curve.mul_base(&k2));
        if sum == Uint::ZERO {
            assert!(bool::from(lhs.is_identity()));
        } else {
            assert_eq!(lhs, curve.mul_base(&sum));
        }

        // k2·(k1·G) = (k1·k2)·G
        let p = curve.mul_base(&k1);
        assert!(curve.is_valid_point(&p));
        let blind = Uint::from_u32(0xDEAD_BEEF);
        assert_eq!(
            curve.mul_secret(&p, &k2, Some(&blind)),
            curve.mul_base(&curve.scalar_mul(&k1, &k2))
        );

        // Shamir agrees with two ladders
        let expected = curve.add_points(&curve.mul_base(&k1), &curve.mul_secret(&p, &k2, None));
        assert_eq!(curve.mul_double_vartime(&k1, &k2, &p), expected);
    }

    #[test]
    fn secp160r1_group_law() {
        group_law(&SECP160R1);
    }

    #[test]
    fn secp192r1_group_law() {
        group_law(&SECP192R1);
    }

    #[test]
    fn secp224r1_group_law() {
        group_law(&SECP224R1);
    }

    #[test]
    fn secp256r1_group_law() {
        group_law(&SECP256R1);
    }

    #[test]
    fn secp256k1_group_law() {
        group_law(&SECP256K1);
    }

    #[test]
    fn secp384r1_group_law() {
        group_law(&SECP384R1);
    }

    fn order_annihilates<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
        let g = curve.generator();
        let n = curve.order();
        assert!(bool::from(curve.mul_base(n).is_identity()));
        assert!(bool::from(curve.mul_point(g, n, curve.order_bits(), None).is_identity()));

        let n_minus_one = n.sbb(&Uint::ONE).0;
        let almost = curve.mul_base(&n_minus_one);
        assert!(bool::from(curve.add_points(&almost, g).is_identity()));

        let k = random_scalar(curve);
        let rest = n.sbb(&k).0;
        assert!(bool::from(
            curve.add_points(&curve.mul_base(&k), &curve.mul_base(&rest)).is_identity()
        ));
        assert_eq!(
            curve.mul_double_vartime(&n_minus_one, &Uint::ONE, g),
            AffinePoint::IDENTITY
        );
    }

    #[test]
    fn order_times_generator_is_identity() {
        order_annihilates(&SECP160R1);
        order_annihilates(&SECP192R1);
        order_annihilates(&SECP224R1);
        order_annihilates(&SECP256R1);
        order_annihilates(&SECP256K1);
        order_annihilates(&SECP384R1);
    }

    fn shamir_small<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
        // 2·G + 3·Q with Q = 5·G is 17·G
        let g = curve.generator();
        let q = curve.mul_base(&Uint::from_u32(5));
        assert_eq!(
            curve.mul_double_vartime(&Uint::from_u32(2), &Uint::from_u32(3), &q),
            curve.mul_base(&Uint::from_u32(17))
        );
        assert_eq!(curve.mul_double_vartime(&Uint::ZERO, &Uint::ONE, g), *g);
        assert_eq!(curve.mul_double_vartime(&Uint::ONE, &Uint::ZERO, &q), *g);
    }

    #[test]
    fn shamir_small_multiples() {
        shamir_small(&SECP160R1);
        shamir_small(&SECP192R1);
        shamir_small(&SECP224R1);
        shamir_small(&SECP256R1);
        shamir_small(&SECP256K1);
        shamir_small(&SECP384R1);
    }

    #[test]
    fn regularized_scalar_has_fixed_length() {
        let n_minus_one = SECP160R1.order().sbb(&Uint::ONE).0;
        for k in [Uint::ONE, Uint::from_u32(0xFFFF), n_minus_one] {
            assert_eq!(SECP160R1.regularize(&k).bits(), SECP160R1.order_bits() + 1);
        }

        // when k + n overflows the word width the top bit is implicit
        let k = SECP256R1.order().sbb(&Uint::ONE).0;
        let regular = SECP256R1.regularize(&k);
        assert_eq!(regular, k.adc(SECP256R1.order()).0);
    }

    #[test]
    fn exceptional_scalars() {
        let curve = &SECP192R1;
        let g = curve.generator();
        let n = curve.order();
        let f = curve.field();
        assert_eq!(curve.mul_base(&Uint::ONE), *g);
        assert_eq!(curve.mul_base(&n.sbb(&Uint::ONE).0), g.negate(f));
        assert_eq!(curve.mul_base(&n.sbb(&Uint::from_u32(2)).0), curve.double_point(g).negate(f));
        assert_eq!(
            curve.mul_base(&n.sbb(&Uint::from_u32(3)).0),
            curve.add_points(&curve.double_point(g), g).negate(f)
        );
    }

    #[test]
    fn adding_inverse_points() {
        let curve = &SECP224R1;
        let g = curve.generator();
        let neg = g.negate(curve.field());
        assert!(bool::from(curve.add_points(g, &neg).is_identity()));
        assert_eq!(curve.add_points(&AffinePoint::IDENTITY, g), *g);
        assert_eq!(curve.add_points(g, &AffinePoint::IDENTITY), *g);
        assert!(bool::from(curve.double_point(&AffinePoint::IDENTITY).is_identity()));
    }
}
