//! Deterministic nonces as described in [RFC 6979].
//!
//! The nonce is the output of an HMAC-DRBG keyed with the secret key and the
//! message hash. Signing the same hash with the same key always yields the
//! same signature, and no random number generator is needed.
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

use super::{hash_to_scalar, sign_with_k, Signature};
use crate::arithmetic::{Uint, Word, WORD_BYTES};
use crate::rng::MAX_TRIES;
use crate::{CurveParams, Error, Result};
use hmac::{
    digest::{core_api::BlockSizeUser, Digest, Key, KeyInit, Output},
    Mac, SimpleHmac,
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Sign a message hash with a nonce derived from `secret` and `hash` by
/// HMAC-DRBG over the digest `D` (RFC 6979, section 3.2).
///
/// The blinding value used while inverting the nonce comes from the same
/// generator. Returns [`Error::InvalidSecretKey`] for a secret outside
/// `[1, n − 1]`, and [`Error::RngExhausted`] should [`MAX_TRIES`] candidates
/// all be rejected.
pub fn sign_deterministic<D, const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    secret: &Uint<S>,
    hash: &[u8],
) -> Result<Signature<S>>
where
    D: Digest + BlockSizeUser,
{
    if !bool::from(curve.is_valid_scalar(secret)) {
        return Err(Error::InvalidSecretKey);
    }

    let e = hash_to_scalar(curve, hash);
    let mut drbg = HmacDrbg::<D>::new(curve, secret, &e);

    for _ in 0..MAX_TRIES {
        let mut k = drbg.next_scalar(curve);
        if !bool::from(curve.is_valid_scalar(&k)) {
            continue;
        }

        let mut blind = drbg.next_scalar(curve);
        if !bool::from(curve.is_valid_scalar(&blind)) {
            blind = Uint::ONE;
        }

        let signature = sign_with_k(curve, secret, &e, &k, &blind);

        #[cfg(feature = "zeroize")]
        {
            k.zeroize();
            blind.zeroize();
        }

        if let Some(signature) = signature {
            return Ok(signature);
        }
    }

    Err(Error::RngExhausted)
}

/// HMAC-DRBG state `(K, V)` producing candidates of `bits(n)` bits.
struct HmacDrbg<D: Digest + BlockSizeUser> {
    k: Output<D>,
    v: Output<D>,
    /// Set once a candidate has been produced: the next one must reseed.
    started: bool,
}

impl<D: Digest + BlockSizeUser> HmacDrbg<D> {
    /// Instantiate with `int2octets(secret) ‖ bits2octets(hash)`.
    fn new<const N: usize, const S: usize>(
        curve: &CurveParams<N, S>,
        secret: &Uint<S>,
        e: &Uint<S>,
    ) -> Self {
        let len = octets_len(curve);
        let mut k = Output::<D>::default();
        let mut v = Output::<D>::default();
        v.fill(0x01);

        for tag in [0x00u8, 0x01] {
            let mut mac = keyed_mac::<D>(&k);
            mac.update(&v);
            mac.update(&[tag]);
            update_int(&mut mac, secret, len);
            update_int(&mut mac, e, len);
            k = mac.finalize().into_bytes();
            v = Self::mac_v(&k, &v);
        }

        Self {
            k,
            v,
            started: false,
        }
    }

    /// `HMAC_K(V)`
    fn mac_v(k: &[u8], v: &[u8]) -> Output<D> {
        let mut mac = keyed_mac::<D>(k);
        mac.update(v);
        mac.finalize().into_bytes()
    }

    /// Next candidate: `bits2int` of the leftmost octets of `V ‖ V' ‖ …`.
    /// Candidates are not range checked.
    fn next_scalar<const N: usize, const S: usize>(
        &mut self,
        curve: &CurveParams<N, S>,
    ) -> Uint<S> {
        if self.started {
            let mut mac = keyed_mac::<D>(&self.k);
            mac.update(&self.v);
            mac.update(&[0x00]);
            self.k = mac.finalize().into_bytes();
            self.v = Self::mac_v(&self.k, &self.v);
        }
        self.started = true;

        let len = octets_len(curve);
        let mut words = [0; S];
        let mut filled = 0;
        while filled < len {
            self.v = Self::mac_v(&self.k, &self.v);
            for &byte in self.v.iter().take(len - filled) {
                let pos = len - 1 - filled;
                words[pos / WORD_BYTES] |= Word::from(byte) << (8 * (pos % WORD_BYTES));
                filled += 1;
            }
        }

        Uint::from_words(words).shr((8 * len - curve.order_bits()) as u32)
    }
}

#[cfg(feature = "zeroize")]
impl<D: Digest + BlockSizeUser> Drop for HmacDrbg<D> {
    fn drop(&mut self) {
        self.k.as_mut_slice().zeroize();
        self.v.as_mut_slice().zeroize();
    }
}

/// `rlen`: octets in an integer of `bits(n)` bits.
fn octets_len<const N: usize, const S: usize>(curve: &CurveParams<N, S>) -> usize {
    (curve.order_bits() + 7) / 8
}

/// Feed `x` to `mac` as a big-endian string of `len` octets.
fn update_int<M: Mac, const S: usize>(mac: &mut M, x: &Uint<S>, len: usize) {
    for pos in (0..len).rev() {
        let byte = (x.as_words()[pos / WORD_BYTES] >> (8 * (pos % WORD_BYTES))) as u8;
        mac.update(&[byte]);
    }
}

/// HMAC keyed with `key`, which is at most one block long. HMAC pads shorter
/// keys with zeros, so the padded block keys the same function.
fn keyed_mac<D: Digest + BlockSizeUser>(key: &[u8]) -> SimpleHmac<D> {
    let mut block = Key::<SimpleHmac<D>>::default();
    debug_assert!(key.len() <= block.len());
    block[..key.len()].copy_from_slice(key);
    let mac = <SimpleHmac<D> as KeyInit>::new(&block);

    #[cfg(feature = "zeroize")]
    block.as_mut_slice().zeroize();

    mac
}

#[cfg(all(test, feature = "sha256"))]
mod tests {
    use super::*;
    use crate::curves::{SECP160R1, SECP256R1};
    use crate::ecdsa::verify;
    use hex_literal::hex;
    use sha2::{Sha256, Sha512};

    const SAMPLE: [u8; 32] =
        hex!("AF2BDBE1AA9B6EC1E2ADE1D694F41FC71A831D0268E9891562113D8A62ADD1BF");

    #[test]
    fn hmac_rfc4231_case_2() {
        let mut mac = keyed_mac::<Sha256>(b"Jefe");
        mac.update(b"what do ya want for nothing?");
        assert_eq!(
            mac.finalize().into_bytes().as_slice(),
            hex!("5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843")
        );
    }

    #[test]
    fn rfc6979_p256_nonce() {
        // A.2.5, SHA-256, message "sample"
        let x = Uint::from_be_hex("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");
        let e = hash_to_scalar(&SECP256R1, &SAMPLE);
        let mut drbg = HmacDrbg::<Sha256>::new(&SECP256R1, &x, &e);
        assert_eq!(
            drbg.next_scalar(&SECP256R1),
            Uint::from_be_hex("A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60")
        );

        let signature = sign_deterministic::<Sha256, 8, 8>(&SECP256R1, &x, &SAMPLE).unwrap();
        assert_eq!(
            *signature.r(),
            Uint::from_be_hex("EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716")
        );
        assert_eq!(
            *signature.s(),
            Uint::from_be_hex("F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8")
        );
    }

    #[test]
    fn wide_order_and_other_digests() {
        let x = Uint::from_be_hex("88C3A2122ED6E3444C62741595ED735B942D0C03");
        let public = SECP160R1.mul_base(&x);

        let a = sign_deterministic::<Sha256, 5, 6>(&SECP160R1, &x, &SAMPLE).unwrap();
        let b = sign_deterministic::<Sha256, 5, 6>(&SECP160R1, &x, &SAMPLE).unwrap();
        assert_eq!(a, b);
        assert!(verify(&SECP160R1, &public, &SAMPLE, &a));

        let c = sign_deterministic::<Sha512, 5, 6>(&SECP160R1, &x, &SAMPLE).unwrap();
        assert_ne!(a, c);
        assert!(verify(&SECP160R1, &public, &SAMPLE, &c));
    }
}
