//! Curve parameters for the supported short Weierstrass curves
//! `y² = x³ + ax + b`.
//!
//! Parameters are from Certicom's SECG
//! "SEC 2: Recommended Elliptic Curve Domain Parameters":
//!
//! <https://www.secg.org/sec2-v2.pdf>

use crate::arithmetic::{AffinePoint, PrimeField, Reduction, Uint};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess};

/// Curve coefficient `a`; only the two values with dedicated doubling
/// formulas are supported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EquationA {
    /// `a = −3` (the NIST/SECG random curves)
    MinusThree,
    /// `a = 0` (secp256k1)
    Zero,
}

/// Domain parameters of a curve over a field of `N` words whose group order
/// fits in `S` words.
///
/// `S` normally equals `N`; it is larger for secp160r1, whose order is one
/// bit wider than its field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurveParams<const N: usize, const S: usize> {
    name: &'static str,
    field: PrimeField<N>,
    a: EquationA,
    b: Uint<N>,
    generator: AffinePoint<N>,
    order: Uint<S>,
}

impl<const N: usize, const S: usize> CurveParams<N, S> {
    /// Assemble curve parameters. The caller is responsible for their
    /// consistency: nothing here validates the curve.
    pub const fn new(
        name: &'static str,
        field: PrimeField<N>,
        a: EquationA,
        b: Uint<N>,
        generator: AffinePoint<N>,
        order: Uint<S>,
    ) -> Self {
        Self {
            name,
            field,
            a,
            b,
            generator,
            order,
        }
    }

    /// SECG name of the curve.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The base field.
    pub const fn field(&self) -> &PrimeField<N> {
        &self.field
    }

    /// Coefficient `a`.
    pub const fn a(&self) -> EquationA {
        self.a
    }

    /// Coefficient `b`.
    pub const fn b(&self) -> &Uint<N> {
        &self.b
    }

    /// Base point `G`.
    pub const fn generator(&self) -> &AffinePoint<N> {
        &self.generator
    }

    /// Order `n` of the base point.
    pub const fn order(&self) -> &Uint<S> {
        &self.order
    }

    /// Bit length of `n`.
    pub fn order_bits(&self) -> usize {
        self.order.bits()
    }

    /// Size of a serialized field element (and of a serialized scalar).
    pub const fn field_bytes(&self) -> usize {
        Uint::<N>::BYTES
    }

    /// Right-hand side of the curve equation, `x³ + ax + b`.
    pub fn x_side(&self, x: &Uint<N>) -> Uint<N> {
        let f = &self.field;
        let mut result = f.square(x);
        if self.a == EquationA::MinusThree {
            result = f.sub(&result, &Uint::from_u32(3));
        }
        result = f.mul(&result, x);
        f.add(&result, &self.b)
    }

    /// Does `point` satisfy the curve equation? The identity does not.
    pub fn is_on_curve(&self, point: &AffinePoint<N>) -> Choice {
        let f = &self.field;
        let in_field = f.contains(&point.x) & f.contains(&point.y);
        in_field & !point.is_identity() & f.square(&point.y).ct_eq(&self.x_side(&point.x))
    }

    /// Is `point` acceptable as a public key: not the identity, both
    /// coordinates below `p`, and on the curve.
    pub fn is_valid_point(&self, point: &AffinePoint<N>) -> bool {
        self.is_on_curve(point).into()
    }

    /// Is `scalar` in `[1, n − 1]`?
    pub fn is_valid_scalar(&self, scalar: &Uint<S>) -> Choice {
        !scalar.is_zero() & scalar.ct_lt(&self.order)
    }

    /// Field element reduced modulo `n`. One subtraction suffices since
    /// `p < 2n` on every supported curve.
    pub(crate) fn field_to_scalar(&self, x: &Uint<N>) -> Uint<S> {
        let x = x.resize::<S>();
        let (diff, borrow) = x.sbb(&self.order);
        Uint::conditional_select(&diff, &x, Choice::from(borrow as u8))
    }

    pub(crate) fn scalar_add(&self, a: &Uint<S>, b: &Uint<S>) -> Uint<S> {
        a.add_mod(b, &self.order)
    }

    pub(crate) fn scalar_mul(&self, a: &Uint<S>, b: &Uint<S>) -> Uint<S> {
        a.mul_mod(b, &self.order)
    }

    pub(crate) fn scalar_invert(&self, a: &Uint<S>) -> Uint<S> {
        a.inv_mod(&self.order)
    }
}

/// secp160r1: 160-bit prime field, `a = −3`, 161-bit order.
pub const SECP160R1: CurveParams<5, 6> = CurveParams::new(
    "secp160r1",
    PrimeField::new(
        Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF7FFFFFFF"),
        Reduction::Secp160r1,
    ),
    EquationA::MinusThree,
    Uint::from_be_hex("1C97BEFC54BD7A8B65ACF89F81D4D4ADC565FA45"),
    AffinePoint::new(
        Uint::from_be_hex("4A96B5688EF573284664698968C38BB913CBFC82"),
        Uint::from_be_hex("23A628553168947D59DCC912042351377AC5FB32"),
    ),
    Uint::from_be_hex("0100000000000000000001F4C8F927AED3CA752257"),
);

/// secp192r1 (NIST P-192).
pub const SECP192R1: CurveParams<6, 6> = CurveParams::new(
    "secp192r1",
    PrimeField::new(
        Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFF"),
        Reduction::Secp192r1,
    ),
    EquationA::MinusThree,
    Uint::from_be_hex("64210519E59C80E70FA7E9AB72243049FEB8DEECC146B9B1"),
    AffinePoint::new(
        Uint::from_be_hex("188DA80EB03090F67CBF20EB43A18800F4FF0AFD82FF1012"),
        Uint::from_be_hex("07192B95FFC8DA78631011ED6B24CDD573F977A11E794811"),
    ),
    Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFF99DEF836146BC9B1B4D22831"),
);

/// secp224r1 (NIST P-224). Its prime is `1 mod 4`, so square roots take the
/// slower Tonelli-Shanks route.
pub const SECP224R1: CurveParams<7, 7> = CurveParams::new(
    "secp224r1",
    PrimeField::new(
        Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF000000000000000000000001"),
        Reduction::Secp224r1,
    ),
    EquationA::MinusThree,
    Uint::from_be_hex("B4050A850C04B3ABF54132565044B0B7D7BFD8BA270B39432355FFB4"),
    AffinePoint::new(
        Uint::from_be_hex("B70E0CBD6BB4BF7F321390B94A03C1D356C21122343280D6115C1D21"),
        Uint::from_be_hex("BD376388B5F723FB4C22DFE6CD4375A05A07476444D5819985007E34"),
    ),
    Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFF16A2E0B8F03E13DD29455C5C2A3D"),
);

/// secp256r1 (NIST P-256).
pub const SECP256R1: CurveParams<8, 8> = CurveParams::new(
    "secp256r1",
    PrimeField::new(
        Uint::from_be_hex("FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF"),
        Reduction::Secp256r1,
    ),
    EquationA::MinusThree,
    Uint::from_be_hex("5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B"),
    AffinePoint::new(
        Uint::from_be_hex("6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296"),
        Uint::from_be_hex("4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5"),
    ),
    Uint::from_be_hex("FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"),
);

/// secp256k1: the Koblitz curve `y² = x³ + 7`.
pub const SECP256K1: CurveParams<8, 8> = CurveParams::new(
    "secp256k1",
    PrimeField::new(
        Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F"),
        Reduction::Secp256k1,
    ),
    EquationA::Zero,
    Uint::from_u32(7),
    AffinePoint::new(
        Uint::from_be_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        Uint::from_be_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"),
    ),
    Uint::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"),
);

/// secp384r1 (NIST P-384).
pub const SECP384R1: CurveParams<12, 12> = CurveParams::new(
    "secp384r1",
    PrimeField::new(
        Uint::from_be_hex(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFF",
        ),
        Reduction::Secp384r1,
    ),
    EquationA::MinusThree,
    Uint::from_be_hex(
        "B3312FA7E23EE7E4988E056BE3F82D19181D9C6EFE8141120314088F5013875AC656398D8A2ED19D2A85C8EDD3EC2AEF",
    ),
    AffinePoint::new(
        Uint::from_be_hex(
            "AA87CA22BE8B05378EB1C71EF320AD746E1D3B628BA79B9859F741E082542A385502F25DBF55296C3A545E3872760AB7",
        ),
        Uint::from_be_hex(
            "3617DE4A96262C6F5D9E98BF9292DC29F8F41DBD289A147CE9DA3113B5F0B8C00A60B1CE1D7E819D7A431D7C90EA0E5F",
        ),
    ),
    Uint::from_be_hex(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC7634D81F4372DDF581A0DB248B0A77AECEC196ACCC52973",
    ),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::WideUint;
    use rand_core::{OsRng, RngCore};

    fn random_below<const M: usize>(modulus: &Uint<M>) -> Uint<M> {
        let mut words = [0; M];
        for word in words.iter_mut() {
            *word = OsRng.next_u32();
        }
        WideUint::from(Uint::from_words(words)).rem(modulus)
    }

    fn check_inverses<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
        let f = curve.field();
        let p = f.modulus();
        let n = curve.order();

        for _ in 0..8 {
            let a = random_below(p);
            if !bool::from(a.is_zero()) {
                assert_eq!(f.mul(&a, &f.invert(&a)), Uint::ONE);
                assert_eq!(a.mul_mod(&a.inv_mod(p), p), Uint::ONE);
            }

            let k = random_below(n);
            if !bool::from(k.is_zero()) {
                assert_eq!(curve.scalar_mul(&k, &curve.scalar_invert(&k)), Uint::ONE);
            }
        }

        let p_minus_one = p.sbb(&Uint::ONE).0;
        assert_eq!(f.invert(&p_minus_one), p_minus_one);
        let n_minus_one = n.sbb(&Uint::ONE).0;
        assert_eq!(curve.scalar_invert(&n_minus_one), n_minus_one);
        assert_eq!(curve.scalar_invert(&Uint::ONE), Uint::ONE);
    }

    fn check_constants<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
        assert!(curve.is_valid_point(curve.generator()));
        assert!(bool::from(curve.field().modulus().is_odd()));
        assert!(bool::from(curve.order().is_odd()));
        assert_eq!(curve.field_bytes(), 4 * N);
    }

    #[test]
    fn generators_are_on_their_curves() {
        check_constants(&SECP160R1);
        check_constants(&SECP192R1);
        check_constants(&SECP224R1);
        check_constants(&SECP256R1);
        check_constants(&SECP256K1);
        check_constants(&SECP384R1);
    }

    #[test]
    fn inverses_modulo_p_and_n() {
        check_inverses(&SECP160R1);
        check_inverses(&SECP192R1);
        check_inverses(&SECP224R1);
        check_inverses(&SECP256R1);
        check_inverses(&SECP256K1);
        check_inverses(&SECP384R1);
    }

    #[test]
    fn order_bit_lengths() {
        assert_eq!(SECP160R1.order_bits(), 161);
        assert_eq!(SECP192R1.order_bits(), 192);
        assert_eq!(SECP224R1.order_bits(), 224);
        assert_eq!(SECP256R1.order_bits(), 256);
        assert_eq!(SECP256K1.order_bits(), 256);
        assert_eq!(SECP384R1.order_bits(), 384);
    }

    #[test]
    fn invalid_points_are_rejected() {
        let g = *SECP256R1.generator();
        assert!(!SECP256R1.is_valid_point(&AffinePoint::IDENTITY));

        let off_curve = AffinePoint::new(g.x, SECP256R1.field().add(&g.y, &Uint::ONE));
        assert!(!SECP256R1.is_valid_point(&off_curve));

        let unreduced = AffinePoint::new(*SECP256R1.field().modulus(), g.y);
        assert!(!SECP256R1.is_valid_point(&unreduced));
    }

    #[test]
    fn field_to_scalar_reduces_once() {
        let n = SECP256R1.order();
        let above = n.adc(&Uint::from_u32(5)).0;
        assert_eq!(SECP256R1.field_to_scalar(&above), Uint::from_u32(5));
        assert_eq!(SECP256R1.field_to_scalar(&Uint::from_u32(5)), Uint::from_u32(5));

        let x = *SECP160R1.field().modulus();
        assert_eq!(SECP160R1.field_to_scalar(&x), x.resize::<6>());
    }

    #[test]
    fn scalar_range() {
        assert!(!bool::from(SECP192R1.is_valid_scalar(&Uint::ZERO)));
        assert!(bool::from(SECP192R1.is_valid_scalar(&Uint::ONE)));
        assert!(!bool::from(SECP192R1.is_valid_scalar(SECP192R1.order())));
    }
}
