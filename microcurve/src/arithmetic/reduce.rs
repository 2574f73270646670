//! Fast reduction of double-width products modulo the field primes.

use super::{Uint, WideUint, WideWord, Word, WORD_BITS};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Strategy for reducing a double-width product modulo a curve's field prime.
///
/// The named variants exploit the special form of each prime; they must only
/// be paired with the prime they were written for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reduction {
    /// `p = 2¹⁶⁰ − 2³¹ − 1`
    Secp160r1,
    /// `p = 2¹⁹² − 2⁶⁴ − 1`
    Secp192r1,
    /// `p = 2²²⁴ − 2⁹⁶ + 1`
    Secp224r1,
    /// `p = 2²⁵⁶ − 2²²⁴ + 2¹⁹² + 2⁹⁶ − 1`
    Secp256r1,
    /// `p = 2²⁵⁶ − 2³² − 977`
    Secp256k1,
    /// `p = 2³⁸⁴ − 2¹²⁸ − 2⁹⁶ + 2³² − 1`
    Secp384r1,
    /// Binary long division; works for any odd modulus.
    Generic,
}

impl Reduction {
    /// Reduce `product` modulo `p`.
    pub fn reduce<const N: usize>(self, product: &WideUint<N>, p: &Uint<N>) -> Uint<N> {
        match self {
            Reduction::Secp160r1 => fold_pseudo_mersenne(product, &[0x8000_0001], p),
            Reduction::Secp192r1 => fold_words(product, p, P192_ADD, &[]),
            Reduction::Secp224r1 => fold_words(product, p, P224_ADD, P224_SUB),
            Reduction::Secp256r1 => fold_words(product, p, P256_ADD, P256_SUB),
            Reduction::Secp256k1 => fold_pseudo_mersenne(product, &[0x0000_03D1, 0x0000_0001], p),
            Reduction::Secp384r1 => fold_words(product, p, P384_ADD, P384_SUB),
            Reduction::Generic => product.rem(p),
        }
    }
}

/// Selects the zero word in a slice table.
const Z: u8 = u8::MAX;

// Word-slice tables for the NIST primes (FIPS 186-4, D.2). Each row lists,
// least significant first, which product word lands in each result word.
// Rows listed twice are added twice.

const P192_ADD: &[&[u8]] = &[
    &[6, 7, 6, 7, Z, Z],
    &[Z, Z, 8, 9, 8, 9],
    &[10, 11, 10, 11, 10, 11],
];

const P224_ADD: &[&[u8]] = &[
    &[Z, Z, Z, 7, 8, 9, 10],
    &[Z, Z, Z, 11, 12, 13, Z],
];
const P224_SUB: &[&[u8]] = &[
    &[7, 8, 9, 10, 11, 12, 13],
    &[11, 12, 13, Z, Z, Z, Z],
];

const P256_ADD: &[&[u8]] = &[
    &[Z, Z, Z, 11, 12, 13, 14, 15],
    &[Z, Z, Z, 11, 12, 13, 14, 15],
    &[Z, Z, Z, 12, 13, 14, 15, Z],
    &[Z, Z, Z, 12, 13, 14, 15, Z],
    &[8, 9, 10, Z, Z, Z, 14, 15],
    &[9, 10, 11, 13, 14, 15, 13, 8],
];
const P256_SUB: &[&[u8]] = &[
    &[11, 12, 13, Z, Z, Z, 8, 10],
    &[12, 13, 14, 15, Z, Z, 9, 11],
    &[13, 14, 15, 8, 9, 10, Z, 12],
    &[14, 15, Z, 9, 10, 11, Z, 13],
];

const P384_ADD: &[&[u8]] = &[
    &[Z, Z, Z, Z, 21, 22, 23, Z, Z, Z, Z, Z],
    &[Z, Z, Z, Z, 21, 22, 23, Z, Z, Z, Z, Z],
    &[12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
    &[21, 22, 23, 12, 13, 14, 15, 16, 17, 18, 19, 20],
    &[Z, 23, Z, 20, 12, 13, 14, 15, 16, 17, 18, 19],
    &[Z, Z, Z, Z, 20, 21, 22, 23, Z, Z, Z, Z],
    &[20, Z, Z, 21, 22, 23, Z, Z, Z, Z, Z, Z],
];
const P384_SUB: &[&[u8]] = &[
    &[23, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22],
    &[Z, 20, 21, 22, 23, Z, Z, Z, Z, Z, Z, Z],
    &[Z, Z, Z, 23, 23, Z, Z, Z, Z, Z, Z, Z],
];

fn gather<const N: usize>(product: &WideUint<N>, row: &[u8]) -> Uint<N> {
    debug_assert_eq!(row.len(), N);
    let mut words = [0; N];
    for (word, &index) in words.iter_mut().zip(row) {
        if index != Z {
            *word = product.word(usize::from(index));
        }
    }
    Uint::from_words(words)
}

/// `T + Σ add − Σ sub` with a signed carry, then settled into `[0, p)`.
fn fold_words<const N: usize>(
    product: &WideUint<N>,
    p: &Uint<N>,
    add: &[&[u8]],
    sub: &[&[u8]],
) -> Uint<N> {
    let mut acc = product.lo;
    let mut carry: i32 = 0;

    for row in add {
        let (sum, c) = acc.adc(&gather(product, row));
        acc = sum;
        carry += c as i32;
    }
    for row in sub {
        let (diff, b) = acc.sbb(&gather(product, row));
        acc = diff;
        carry -= b as i32;
    }

    settle(acc, carry, p, sub.len() + 1, add.len() + 1)
}

/// Reduction for `p = 2^(32·N) − c` where `c` is given in words: the high
/// half is folded onto the low half as `lo + hi·c`. Two folds leave at most
/// one bit above the low half.
fn fold_pseudo_mersenne<const N: usize>(
    product: &WideUint<N>,
    c: &[Word],
    p: &Uint<N>,
) -> Uint<N> {
    let once = fold_once(&product.lo, &product.hi, c);
    let twice = fold_once(&once.lo, &once.hi, c);
    debug_assert!(twice.hi.0[1..].iter().all(|&w| w == 0));
    settle(twice.lo, twice.hi.0[0] as i32, p, 0, 2)
}

fn fold_once<const N: usize>(lo: &Uint<N>, hi: &Uint<N>, c: &[Word]) -> WideUint<N> {
    let mut acc = WideUint::from(*lo);

    for (j, &cj) in c.iter().enumerate() {
        let mut carry: WideWord = 0;
        for i in 0..N {
            let t = WideWord::from(hi.0[i]) * WideWord::from(cj)
                + WideWord::from(acc.word(i + j))
                + carry;
            acc.set_word(i + j, t as Word);
            carry = t >> WORD_BITS;
        }
        for k in (N + j)..(2 * N) {
            let t = WideWord::from(acc.word(k)) + carry;
            acc.set_word(k, t as Word);
            carry = t >> WORD_BITS;
        }
    }

    acc
}

/// Bring `value + carry·2^(32·N)` into `[0, p)` with `under` conditional
/// additions of `p` followed by `over` conditional subtractions. The counts
/// depend only on the reduction, never on the value.
fn settle<const N: usize>(
    mut value: Uint<N>,
    mut carry: i32,
    p: &Uint<N>,
    under: usize,
    over: usize,
) -> Uint<N> {
    for _ in 0..under {
        let negative = Choice::from((carry as u32 >> 31) as u8);
        let (sum, c) = value.adc(p);
        value.conditional_assign(&sum, negative);
        carry += i32::conditional_select(&0, &(c as i32), negative);
    }

    for _ in 0..over {
        let (diff, b) = value.sbb(p);
        // value is already in range exactly when nothing is carried and
        // subtracting p borrows
        let done = carry.ct_eq(&0) & Choice::from(b as u8);
        value.conditional_assign(&diff, !done);
        carry -= i32::conditional_select(&(b as i32), &0, done);
    }

    debug_assert!(carry == 0 && value < *p);
    value
}
