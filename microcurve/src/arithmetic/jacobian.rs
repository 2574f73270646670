//! Jacobian doubling and co-Z addition.
//!
//! A Jacobian triple `(X, Y, Z)` stands for the affine point `(X/Z², Y/Z³)`.
//! Two points are "co-Z" when they share the same `Z`, which is then kept
//! implicit: the co-Z formulas from <https://eprint.iacr.org/2011/338.pdf>
//! update both points of a pair and scale their common `Z` without ever
//! computing it.

use super::{PrimeField, Uint};
use crate::EquationA;
use subtle::{Choice, ConditionallySelectable};

/// `(X, Y)` of a point whose `Z` is shared with another point.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CoZPoint<const N: usize> {
    pub(crate) x: Uint<N>,
    pub(crate) y: Uint<N>,
}

impl<const N: usize> ConditionallySelectable for CoZPoint<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Uint::conditional_select(&a.x, &b.x, choice),
            y: Uint::conditional_select(&a.y, &b.y, choice),
        }
    }
}

/// Double `(X, Y, Z)` in place. The result is the standard Jacobian double
/// scaled by `1/2`. A point with `Z = 0` is left unchanged.
pub(crate) fn double<const N: usize>(
    f: &PrimeField<N>,
    a: EquationA,
    x: &mut Uint<N>,
    y: &mut Uint<N>,
    z: &mut Uint<N>,
) {
    if bool::from(z.is_zero()) {
        return;
    }

    let y2 = f.square(y);
    let big_a = f.mul(x, &y2); // A = x·y²
    let y4 = f.square(&y2);
    let z3 = f.mul(y, z);

    // B = 3/2·(x² − z⁴) for a = −3, 3/2·x² for a = 0
    let big_b = match a {
        EquationA::MinusThree => {
            let z2 = f.square(z);
            let t = f.mul(&f.add(x, &z2), &f.sub(x, &z2));
            f.half(&f.add(&f.add(&t, &t), &t))
        }
        EquationA::Zero => {
            let x2 = f.square(x);
            f.half(&f.add(&f.add(&x2, &x2), &x2))
        }
    };

    let x3 = f.sub(&f.sub(&f.square(&big_b), &big_a), &big_a);
    let y3 = f.sub(&f.mul(&big_b, &f.sub(&big_a, &x3)), &y4);

    *x = x3;
    *y = y3;
    *z = z3;
}

/// `(X, Y) ← (X·Z², Y·Z³)`
pub(crate) fn apply_z<const N: usize>(
    f: &PrimeField<N>,
    x: &mut Uint<N>,
    y: &mut Uint<N>,
    z: &Uint<N>,
) {
    let z2 = f.square(z);
    *x = f.mul(x, &z2);
    let z3 = f.mul(&z2, z);
    *y = f.mul(y, &z3);
}

/// From affine `P` in `p1`, produce the co-Z pair `(2P, P)` in
/// `(p1, p2)`, starting from `Z = initial_z` (or 1).
pub(crate) fn initial_double<const N: usize>(
    f: &PrimeField<N>,
    a: EquationA,
    p1: &mut CoZPoint<N>,
    p2: &mut CoZPoint<N>,
    initial_z: Option<&Uint<N>>,
) {
    let mut z = initial_z.copied().unwrap_or(Uint::ONE);

    *p2 = *p1;
    apply_z(f, &mut p1.x, &mut p1.y, &z);
    double(f, a, &mut p1.x, &mut p1.y, &mut z);
    apply_z(f, &mut p2.x, &mut p2.y, &z);
}

/// Co-Z addition: `(p1, p2) ← (P', P + Q)` where `P'` is `P` re-expressed
/// at the new common `Z`, which is the old one times `(x2 − x1)`.
pub(crate) fn add<const N: usize>(f: &PrimeField<N>, p1: &mut CoZPoint<N>, p2: &mut CoZPoint<N>) {
    let t = f.square(&f.sub(&p2.x, &p1.x)); // A
    let b = f.mul(&p1.x, &t);
    let c = f.mul(&p2.x, &t);
    let dy = f.sub(&p2.y, &p1.y);

    let x3 = f.sub(&f.sub(&f.square(&dy), &b), &c);
    let e = f.mul(&p1.y, &f.sub(&c, &b));
    let y3 = f.sub(&f.mul(&dy, &f.sub(&b, &x3)), &e);

    p1.x = b;
    p1.y = e;
    p2.x = x3;
    p2.y = y3;
}

/// Conjugate co-Z addition: `(p1, p2) ← (P − Q, P + Q)`, both at the new
/// common `Z`.
pub(crate) fn add_conjugate<const N: usize>(
    f: &PrimeField<N>,
    p1: &mut CoZPoint<N>,
    p2: &mut CoZPoint<N>,
) {
    let t = f.square(&f.sub(&p2.x, &p1.x)); // A
    let b = f.mul(&p1.x, &t);
    let c = f.mul(&p2.x, &t);
    let sum_y = f.add(&p2.y, &p1.y);
    let diff_y = f.sub(&p2.y, &p1.y);
    let e = f.mul(&p1.y, &f.sub(&c, &b));
    let b_plus_c = f.add(&b, &c);

    // P + Q
    let x3 = f.sub(&f.square(&diff_y), &b_plus_c);
    let y3 = f.sub(&f.mul(&diff_y, &f.sub(&b, &x3)), &e);

    // P − Q
    let x3_conj = f.sub(&f.square(&sum_y), &b_plus_c);
    let y3_conj = f.sub(&f.mul(&sum_y, &f.sub(&x3_conj, &b)), &e);

    p1.x = x3_conj;
    p1.y = y3_conj;
    p2.x = x3;
    p2.y = y3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{SECP192R1, SECP256K1};
    use crate::AffinePoint;

    fn to_affine<const N: usize>(
        f: &PrimeField<N>,
        mut x: Uint<N>,
        mut y: Uint<N>,
        z: &Uint<N>,
    ) -> AffinePoint<N> {
        apply_z(f, &mut x, &mut y, &f.invert(z));
        AffinePoint::new(x, y)
    }

    #[test]
    fn co_z_additions_match_affine() {
        let curve = &SECP192R1;
        let f = curve.field();
        let g = *curve.generator();
        let two_g = curve.double_point(&g);
        let three_g = curve.add_points(&two_g, &g);
        assert!(curve.is_valid_point(&three_g));

        // (2G, G) sharing Z = y(G), then (2G − G, 2G + G)
        let mut p1 = CoZPoint { x: g.x, y: g.y };
        let mut p2 = CoZPoint::default();
        initial_double(f, curve.a(), &mut p1, &mut p2, None);
        assert_eq!(to_affine(f, p1.x, p1.y, &g.y), two_g);
        assert_eq!(to_affine(f, p2.x, p2.y, &g.y), g);

        let z = f.mul(&g.y, &f.sub(&p2.x, &p1.x));
        add_conjugate(f, &mut p1, &mut p2);
        assert_eq!(to_affine(f, p1.x, p1.y, &z), g);
        assert_eq!(to_affine(f, p2.x, p2.y, &z), three_g);

        // affine inputs share Z = 1
        let mut one = CoZPoint { x: g.x, y: g.y };
        let mut three = CoZPoint { x: two_g.x, y: two_g.y };
        add(f, &mut one, &mut three);
        let z = f.sub(&two_g.x, &g.x);
        assert_eq!(to_affine(f, three.x, three.y, &z), three_g);
        assert_eq!(to_affine(f, one.x, one.y, &z), g);
    }

    #[test]
    fn double_with_zero_z_is_noop() {
        let f = SECP256K1.field();
        let mut x = Uint::from_u32(5);
        let mut y = Uint::from_u32(9);
        let mut z = Uint::ZERO;
        double(f, EquationA::Zero, &mut x, &mut y, &mut z);
        assert_eq!((x, y, z), (Uint::from_u32(5), Uint::from_u32(9), Uint::ZERO));
    }

    #[test]
    fn blinded_initial_double_is_same_point() {
        let curve = &SECP256K1;
        let f = curve.field();
        let g = *curve.generator();
        let blind = Uint::from_u32(0x1234_5678);

        let mut plain = (CoZPoint { x: g.x, y: g.y }, CoZPoint::default());
        initial_double(f, curve.a(), &mut plain.0, &mut plain.1, None);
        let mut blinded = (CoZPoint { x: g.x, y: g.y }, CoZPoint::default());
        initial_double(f, curve.a(), &mut blinded.0, &mut blinded.1, Some(&blind));

        // second component is G at the pair's Z, so X/x = Z²; the doubled Z
        // picks up the starting Z to the fourth power
        let z2_plain = f.mul(&plain.1.x, &f.invert(&g.x));
        let z2_blinded = f.mul(&blinded.1.x, &f.invert(&g.x));
        let ratio = f.mul(&z2_blinded, &f.invert(&z2_plain));
        assert_eq!(ratio, f.square(&f.square(&f.square(&blind))));
    }
}
