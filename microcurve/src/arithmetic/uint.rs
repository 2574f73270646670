//! Fixed-width unsigned integers

use crate::{Error, Result};
use core::{cmp::Ordering, fmt};
use subtle::{
    Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess,
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Machine word integers are built from.
pub type Word = u32;

/// Holds the full product of two [`Word`]s.
pub(crate) type WideWord = u64;

/// Size of a [`Word`] in bits.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Size of a [`Word`] in bytes.
pub const WORD_BYTES: usize = WORD_BITS / 8;

/// Unsigned integer of exactly `N` words, least significant word first.
///
/// Values are never normalized: every operation works on all `N` words, so
/// the sequence of memory accesses and arithmetic does not depend on the
/// value (aside from the explicitly `vartime` helpers).
#[derive(Clone, Copy)]
pub struct Uint<const N: usize>(pub(crate) [Word; N]);

impl<const N: usize> Uint<N> {
    /// Zero.
    pub const ZERO: Self = Self([0; N]);

    /// One.
    pub const ONE: Self = Self::from_u32(1);

    /// Width in bits.
    pub const BITS: usize = N * WORD_BITS;

    /// Width in bytes.
    pub const BYTES: usize = N * WORD_BYTES;

    /// Create from words, least significant first.
    pub const fn from_words(words: [Word; N]) -> Self {
        Self(words)
    }

    /// Borrow the words, least significant first.
    pub const fn as_words(&self) -> &[Word; N] {
        &self.0
    }

    /// Create from a single word.
    pub const fn from_u32(n: Word) -> Self {
        let mut words = [0; N];
        words[0] = n;
        Self(words)
    }

    /// Parse a big-endian hex string. Shorter strings are zero-extended.
    ///
    /// Intended for constants; panics (at compile time in `const` context)
    /// on invalid digits or a string wider than `N` words.
    pub const fn from_be_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        assert!(bytes.len() <= N * WORD_BITS / 4, "hex string too long");

        let mut words = [0; N];
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[bytes.len() - 1 - i];
            let nibble = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit"),
            };
            words[i / 8] |= (nibble as Word) << ((i % 8) * 4);
            i += 1;
        }

        Self(words)
    }

    /// Decode big-endian bytes. Inputs shorter than [`Self::BYTES`] are
    /// zero-extended; longer inputs are rejected.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::BYTES {
            return Err(Error::Encoding);
        }

        let mut words = [0; N];
        for (i, byte) in bytes.iter().rev().enumerate() {
            words[i / WORD_BYTES] |= Word::from(*byte) << (8 * (i % WORD_BYTES));
        }

        Ok(Self(words))
    }

    /// Encode as big-endian bytes filling all of `out`.
    ///
    /// If `out` is shorter than [`Self::BYTES`] the most significant bytes
    /// are dropped; if longer, it is zero-padded on the left.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().rev().enumerate() {
            *byte = if i < Self::BYTES {
                (self.0[i / WORD_BYTES] >> (8 * (i % WORD_BYTES))) as u8
            } else {
                0
            };
        }
    }

    /// Zero-extend or truncate to `M` words.
    pub fn resize<const M: usize>(&self) -> Uint<M> {
        let mut words = [0; M];
        let len = if N < M { N } else { M };
        words[..len].copy_from_slice(&self.0[..len]);
        Uint(words)
    }

    /// Is this value zero?
    pub fn is_zero(&self) -> Choice {
        let mut acc = 0;
        for word in &self.0 {
            acc |= word;
        }
        acc.ct_eq(&0)
    }

    /// Is this value odd?
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Bit `index`, counting from the least significant bit.
    pub fn bit(&self, index: usize) -> Choice {
        debug_assert!(index < Self::BITS);
        Choice::from(((self.0[index / WORD_BITS] >> (index % WORD_BITS)) & 1) as u8)
    }

    /// Number of significant bits; zero for zero.
    ///
    /// Runs in variable time: use only on public values.
    pub fn bits(&self) -> usize {
        for i in (0..N).rev() {
            if self.0[i] != 0 {
                return i * WORD_BITS + (WORD_BITS - self.0[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Add with carry out (`0` or `1`).
    pub fn adc(&self, rhs: &Self) -> (Self, Word) {
        let mut words = [0; N];
        let mut carry: Word = 0;
        for i in 0..N {
            let t = WideWord::from(self.0[i]) + WideWord::from(rhs.0[i]) + WideWord::from(carry);
            words[i] = t as Word;
            carry = (t >> WORD_BITS) as Word;
        }
        (Self(words), carry)
    }

    /// Subtract with borrow out (`0` or `1`).
    pub fn sbb(&self, rhs: &Self) -> (Self, Word) {
        let mut words = [0; N];
        let mut borrow: Word = 0;
        for i in 0..N {
            let t = WideWord::from(self.0[i])
                .wrapping_sub(WideWord::from(rhs.0[i]) + WideWord::from(borrow));
            words[i] = t as Word;
            borrow = (t >> (2 * WORD_BITS - 1)) as Word;
        }
        (Self(words), borrow)
    }

    /// Shift left by `shift < 32` bits, returning the bits shifted out.
    pub fn shl(&self, shift: u32) -> (Self, Word) {
        debug_assert!(shift < Word::BITS);
        if shift == 0 {
            return (*self, 0);
        }

        let mut words = [0; N];
        let mut carry = 0;
        for i in 0..N {
            words[i] = (self.0[i] << shift) | carry;
            carry = self.0[i] >> (Word::BITS - shift);
        }
        (Self(words), carry)
    }

    /// Shift right by `shift < 32` bits.
    pub fn shr(&self, shift: u32) -> Self {
        debug_assert!(shift < Word::BITS);
        if shift == 0 {
            return *self;
        }

        let mut words = [0; N];
        let mut carry = 0;
        for i in (0..N).rev() {
            words[i] = (self.0[i] >> shift) | carry;
            carry = self.0[i] << (Word::BITS - shift);
        }
        Self(words)
    }

    /// Shift right by one bit, moving `carry_in` (`0` or `1`) into the top bit.
    pub fn shr1(&self, carry_in: Word) -> Self {
        let mut words = [0; N];
        let mut carry = carry_in << (Word::BITS - 1);
        for i in (0..N).rev() {
            words[i] = (self.0[i] >> 1) | carry;
            carry = self.0[i] << (Word::BITS - 1);
        }
        Self(words)
    }

    /// Full product, computed column by column.
    pub fn mul_wide(&self, rhs: &Self) -> WideUint<N> {
        let mut out = WideUint::ZERO;
        let (mut r0, mut r1, mut r2): (Word, Word, Word) = (0, 0, 0);

        for k in 0..(2 * N - 1) {
            let min = if k < N { 0 } else { k + 1 - N };
            for i in min..=k.min(N - 1) {
                let p = WideWord::from(self.0[i]) * WideWord::from(rhs.0[k - i]);
                accumulate(p, &mut r0, &mut r1, &mut r2);
            }
            out.set_word(k, r0);
            r0 = r1;
            r1 = r2;
            r2 = 0;
        }
        out.set_word(2 * N - 1, r0);

        out
    }

    /// Full square; identical to `self.mul_wide(self)` with the cross
    /// products computed once and doubled.
    pub fn square_wide(&self) -> WideUint<N> {
        let mut out = WideUint::ZERO;
        let (mut r0, mut r1, mut r2): (Word, Word, Word) = (0, 0, 0);

        for k in 0..(2 * N - 1) {
            let mut i = if k < N { 0 } else { k + 1 - N };
            while 2 * i <= k {
                let p = WideWord::from(self.0[i]) * WideWord::from(self.0[k - i]);
                if i < k - i {
                    r2 = r2.wrapping_add((p >> (2 * WORD_BITS - 1)) as Word);
                    accumulate(p << 1, &mut r0, &mut r1, &mut r2);
                } else {
                    accumulate(p, &mut r0, &mut r1, &mut r2);
                }
                i += 1;
            }
            out.set_word(k, r0);
            r0 = r1;
            r1 = r2;
            r2 = 0;
        }
        out.set_word(2 * N - 1, r0);

        out
    }
}

/// `(r2, r1, r0) += p`
#[inline(always)]
fn accumulate(p: WideWord, r0: &mut Word, r1: &mut Word, r2: &mut Word) {
    let r01 = (WideWord::from(*r1) << WORD_BITS) | WideWord::from(*r0);
    let (r01, overflow) = r01.overflowing_add(p);
    *r2 = r2.wrapping_add(Word::from(overflow));
    *r1 = (r01 >> WORD_BITS) as Word;
    *r0 = r01 as Word;
}

impl<const N: usize> ConditionallySelectable for Uint<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut words = [0; N];
        for i in 0..N {
            words[i] = Word::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(words)
    }
}

impl<const N: usize> ConstantTimeEq for Uint<N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut acc = Choice::from(1);
        for i in 0..N {
            acc &= self.0[i].ct_eq(&other.0[i]);
        }
        acc
    }
}

impl<const N: usize> ConstantTimeGreater for Uint<N> {
    fn ct_gt(&self, other: &Self) -> Choice {
        let (_, borrow) = other.sbb(self);
        Choice::from(borrow as u8)
    }
}

impl<const N: usize> ConstantTimeLess for Uint<N> {}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> PartialEq for Uint<N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const N: usize> Eq for Uint<N> {}

impl<const N: usize> Ord for Uint<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (diff, borrow) = self.sbb(other);
        if borrow != 0 {
            Ordering::Less
        } else if bool::from(diff.is_zero()) {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> fmt::Debug for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint(0x{:X})", self)
    }
}

impl<const N: usize> fmt::LowerHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0.iter().rev() {
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::UpperHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0.iter().rev() {
            write!(f, "{:08X}", word)?;
        }
        Ok(())
    }
}

#[cfg(feature = "zeroize")]
impl<const N: usize> Zeroize for Uint<N> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Double-width integer holding the product of two [`Uint<N>`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WideUint<const N: usize> {
    pub(crate) lo: Uint<N>,
    pub(crate) hi: Uint<N>,
}

impl<const N: usize> WideUint<N> {
    /// Zero.
    pub const ZERO: Self = Self::new(Uint::ZERO, Uint::ZERO);

    /// Create from low and high halves.
    pub const fn new(lo: Uint<N>, hi: Uint<N>) -> Self {
        Self { lo, hi }
    }

    /// Low half.
    pub const fn lo(&self) -> &Uint<N> {
        &self.lo
    }

    /// High half.
    pub const fn hi(&self) -> &Uint<N> {
        &self.hi
    }

    pub(crate) fn word(&self, index: usize) -> Word {
        if index < N {
            self.lo.0[index]
        } else {
            self.hi.0[index - N]
        }
    }

    pub(crate) fn set_word(&mut self, index: usize, word: Word) {
        if index < N {
            self.lo.0[index] = word;
        } else {
            self.hi.0[index - N] = word;
        }
    }

    /// `modulus << shift` for `shift < 2 * Uint::<N>::BITS`, dropping bits
    /// shifted past the top.
    pub(crate) fn shifted(modulus: &Uint<N>, shift: usize) -> Self {
        let (word_shift, bit_shift) = (shift / WORD_BITS, shift % WORD_BITS);
        let mut out = Self::ZERO;
        let mut carry = 0;

        for i in 0..N {
            let index = word_shift + i;
            let word = modulus.0[i];
            if index < 2 * N {
                out.set_word(index, (word << bit_shift) | carry);
            }
            carry = if bit_shift == 0 {
                0
            } else {
                word >> (WORD_BITS - bit_shift)
            };
        }
        if word_shift + N < 2 * N {
            out.set_word(word_shift + N, carry);
        }

        out
    }

    pub(crate) fn sbb(&self, rhs: &Self) -> (Self, Word) {
        let (lo, borrow) = self.lo.sbb(&rhs.lo);
        let (hi, borrow_hi) = self.hi.sbb(&rhs.hi);
        let (hi, borrow_lo) = hi.sbb(&Uint::from_u32(borrow));
        (Self { lo, hi }, borrow_hi | borrow_lo)
    }

    pub(crate) fn shr1(&self) -> Self {
        Self {
            lo: self.lo.shr1(self.hi.0[0] & 1),
            hi: self.hi.shr1(0),
        }
    }
}

impl<const N: usize> From<Uint<N>> for WideUint<N> {
    fn from(lo: Uint<N>) -> Self {
        Self::new(lo, Uint::ZERO)
    }
}

impl<const N: usize> ConditionallySelectable for WideUint<N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            lo: Uint::conditional_select(&a.lo, &b.lo, choice),
            hi: Uint::conditional_select(&a.hi, &b.hi, choice),
        }
    }
}
