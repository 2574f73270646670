//! Random scalar generation.

use crate::arithmetic::{Uint, Word, WORD_BITS, WORD_BYTES};
use crate::{Error, Result};
use core::num::NonZeroU32;
use rand_core::{CryptoRng, CryptoRngCore, RngCore};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Upper bound on the number of random candidates drawn by any operation
/// before it gives up with [`Error::RngExhausted`].
pub const MAX_TRIES: usize = 64;

/// Uniform integer below `2^bits`, drawn word by word.
pub(crate) fn random_bits<const S: usize>(
    rng: &mut impl CryptoRngCore,
    bits: usize,
) -> Result<Uint<S>> {
    debug_assert!(bits <= Uint::<S>::BITS);
    let mut words = [0; S];
    let mut bytes = [0u8; WORD_BYTES];

    for (i, word) in words.iter_mut().enumerate() {
        let low = i * WORD_BITS;
        if low >= bits {
            break;
        }

        rng.try_fill_bytes(&mut bytes)
            .map_err(|_| Error::RngExhausted)?;
        *word = Word::from_le_bytes(bytes);
        if bits - low < WORD_BITS {
            *word &= (1 << (bits - low)) - 1;
        }
    }

    #[cfg(feature = "zeroize")]
    bytes.zeroize();

    Ok(Uint::from_words(words))
}

/// Uniform integer in `[1, bound − 1]` by rejection sampling over
/// `bits`-bit candidates, bounded by [`MAX_TRIES`].
pub(crate) fn random_nonzero_below<const S: usize>(
    rng: &mut impl CryptoRngCore,
    bits: usize,
    bound: &Uint<S>,
) -> Result<Uint<S>> {
    for _ in 0..MAX_TRIES {
        let candidate = random_bits::<S>(rng, bits)?;
        if !bool::from(candidate.is_zero()) && candidate < *bound {
            return Ok(candidate);
        }
    }

    Err(Error::RngExhausted)
}

/// Error code reported by [`FnRng`] when its fill function fails.
pub const FILL_FAILED: NonZeroU32 = match NonZeroU32::new(rand_core::Error::CUSTOM_START) {
    Some(code) => code,
    None => panic!("zero error code"),
};

/// Random number generator backed by a fill function returning `false` on
/// failure, for platforms whose entropy source has that shape.
///
/// Wrapping a function asserts that it produces cryptographically secure
/// output.
///
/// ```
/// use microcurve::{ecdh, rng::FnRng, SECP256R1};
///
/// let mut rng = FnRng(|buf: &mut [u8]| getrandom(buf));
/// # fn getrandom(buf: &mut [u8]) -> bool {
/// #     use rand_core::RngCore;
/// #     rand_core::OsRng.try_fill_bytes(buf).is_ok()
/// # }
/// let keys = ecdh::make_key_pair(&SECP256R1, &mut rng).unwrap();
/// ```
pub struct FnRng<F>(pub F);

impl<F: FnMut(&mut [u8]) -> bool> RngCore for FnRng<F> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("Error: {}", err);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        if (self.0)(dest) {
            Ok(())
        } else {
            Err(rand_core::Error::from(FILL_FAILED))
        }
    }
}

impl<F: FnMut(&mut [u8]) -> bool> CryptoRng for FnRng<F> {}
