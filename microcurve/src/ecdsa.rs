//! Elliptic Curve Digital Signature Algorithm (ECDSA).
//!
//! The free functions [`sign`], [`sign_deterministic`] and [`verify`]
//! operate on message hashes ("prehashes") of any length: a hash longer
//! than the group order is truncated to its leftmost `bits(n)` bits.
//!
//! [`SigningKey`] and [`VerifyingKey`] bind a key to its curve and
//! implement the traits of the [`signature`] crate.
//!
//! ## Signing and verifying with SHA-256
//!
//! ```
//! # #[cfg(all(feature = "sha256", feature = "getrandom"))]
//! # {
//! use microcurve::{
//!     ecdsa::{signature::{Signer, Verifier}, SigningKey},
//!     rand_core::OsRng,
//!     SECP256K1,
//! };
//!
//! let signing_key = SigningKey::random(&SECP256K1, &mut OsRng).unwrap();
//! let message = b"ECDSA proves knowledge of a secret number in the context of a single message";
//! let signature = signing_key.sign(message);
//!
//! let verifying_key = signing_key.verifying_key();
//! assert!(verifying_key.verify(message, &signature).is_ok());
//! # }
//! ```

mod deterministic;

pub use deterministic::sign_deterministic;
pub use signature;

use crate::rng::{random_bits, random_nonzero_below, MAX_TRIES};
use crate::{AffinePoint, CurveParams, Error, Result, Uint, WORD_BYTES};
use rand_core::CryptoRngCore;
use signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use subtle::{Choice, ConditionallySelectable};

#[cfg(feature = "sha256")]
use {
    sha2::{Digest, Sha256},
    signature::{hazmat::PrehashSigner, RandomizedSigner, Signer, Verifier},
};

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An ECDSA signature `(r, s)` with scalars of `S` words.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature<const S: usize> {
    r: Uint<S>,
    s: Uint<S>,
}

impl<const S: usize> Signature<S> {
    /// Assemble a signature from its components, unchecked.
    pub const fn from_scalars(r: Uint<S>, s: Uint<S>) -> Self {
        Self { r, s }
    }

    /// `r` component.
    pub fn r(&self) -> &Uint<S> {
        &self.r
    }

    /// `s` component.
    pub fn s(&self) -> &Uint<S> {
        &self.s
    }

    /// Parse `r ‖ s`, each [`CurveParams::field_bytes`] long.
    pub fn from_bytes<const N: usize>(curve: &CurveParams<N, S>, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 * curve.field_bytes() {
            return Err(Error::Encoding);
        }
        let (r, s) = bytes.split_at(curve.field_bytes());
        Ok(Self {
            r: curve.decode_scalar(r)?,
            s: curve.decode_scalar(s)?,
        })
    }

    /// Write `r ‖ s` into `out`, which must be `2 · field_bytes` long.
    pub fn write_bytes<const N: usize>(
        &self,
        curve: &CurveParams<N, S>,
        out: &mut [u8],
    ) -> Result<()> {
        if out.len() != 2 * curve.field_bytes() {
            return Err(Error::Encoding);
        }
        let (r, s) = out.split_at_mut(curve.field_bytes());
        curve.encode_scalar(&self.r, r)?;
        curve.encode_scalar(&self.s, s)
    }
}

/// Convert a message hash to an integer: its leftmost `bits(n)` bits (or the
/// whole hash when shorter), big-endian. The result is below
/// `2^bits(n)` but not reduced.
pub(crate) fn bits2int<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    hash: &[u8],
) -> Uint<S> {
    let n_bits = curve.order_bits();
    let n_bytes = (n_bits + 7) / 8;
    debug_assert!(n_bytes <= S * WORD_BYTES);

    if hash.len() < n_bytes {
        return Uint::from_be_slice(hash).unwrap_or(Uint::ZERO);
    }

    let truncated = Uint::from_be_slice(&hash[..n_bytes]).unwrap_or(Uint::ZERO);
    truncated.shr((n_bytes * 8 - n_bits) as u32)
}

/// [`bits2int`] reduced modulo `n`.
pub(crate) fn hash_to_scalar<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    hash: &[u8],
) -> Uint<S> {
    let e = bits2int(curve, hash);
    let (reduced, borrow) = e.sbb(curve.order());
    Uint::conditional_select(&reduced, &e, Choice::from(borrow as u8))
}

/// One signing attempt with nonce `k ∈ [1, n − 1]` and inversion blinding
/// `blind ∈ [1, n − 1]`. Returns `None` when `r` or `s` comes out zero, or
/// when `s` is too wide to serialize; the caller retries with another nonce.
pub(crate) fn sign_with_k<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    secret: &Uint<S>,
    e: &Uint<S>,
    k: &Uint<S>,
    blind: &Uint<S>,
) -> Option<Signature<S>> {
    let point = curve.mul_base(k);
    let r = curve.field_to_scalar(&point.x);
    if bool::from(r.is_zero()) {
        return None;
    }

    // k⁻¹ = (k·b)⁻¹·b keeps k out of the inversion
    let mut k_inv = curve.scalar_invert(&curve.scalar_mul(k, blind));
    k_inv = curve.scalar_mul(&k_inv, blind);

    let s = curve.scalar_mul(&k_inv, &curve.scalar_add(e, &curve.scalar_mul(&r, secret)));

    #[cfg(feature = "zeroize")]
    k_inv.zeroize();

    if bool::from(s.is_zero()) || s.bits() > 8 * curve.field_bytes() {
        return None;
    }

    Some(Signature { r, s })
}

/// Sign a message hash with a random nonce.
///
/// Each attempt draws a nonce of `bits(n)` bits and a blinding value from
/// `rng`; candidate nonces that are zero or not below `n` are rejected.
/// Returns [`Error::RngExhausted`] after [`MAX_TRIES`] attempts or when `rng`
/// fails, and [`Error::InvalidSecretKey`] for a secret outside `[1, n − 1]`.
pub fn sign<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    secret: &Uint<S>,
    hash: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature<S>> {
    if !bool::from(curve.is_valid_scalar(secret)) {
        return Err(Error::InvalidSecretKey);
    }

    let n = curve.order();
    let n_bits = curve.order_bits();
    let e = hash_to_scalar(curve, hash);

    for _ in 0..MAX_TRIES {
        let mut k = random_bits::<S>(rng, n_bits)?;
        if !bool::from(curve.is_valid_scalar(&k)) {
            continue;
        }

        let mut blind = random_nonzero_below(rng, n_bits, n)?;
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

/// Verify `signature` over a message hash with the public key `public`.
///
/// Returns `false` for an invalid public key, for `r` or `s` outside
/// `[1, n − 1]`, and for a signature that does not match. Runs in variable
/// time: every input is public.
pub fn verify<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    public: &AffinePoint<N>,
    hash: &[u8],
    signature: &Signature<S>,
) -> bool {
    let (r, s) = (&signature.r, &signature.s);
    if !curve.is_valid_point(public)
        || !bool::from(curve.is_valid_scalar(r) & curve.is_valid_scalar(s))
    {
        return false;
    }

    let e = hash_to_scalar(curve, hash);
    let w = curve.scalar_invert(s);
    let u1 = curve.scalar_mul(&e, &w);
    let u2 = curve.scalar_mul(r, &w);

    let point = curve.mul_double_vartime(&u1, &u2, public);
    if bool::from(point.is_identity()) {
        return false;
    }

    curve.field_to_scalar(&point.x) == *r
}

/// ECDSA signing key: a secret scalar bound to its curve.
pub struct SigningKey<'a, const N: usize, const S: usize> {
    curve: &'a CurveParams<N, S>,
    secret: Uint<S>,
    verifying_key: VerifyingKey<'a, N, S>,
}

impl<'a, const N: usize, const S: usize> SigningKey<'a, N, S> {
    /// Generate a random signing key.
    pub fn random(curve: &'a CurveParams<N, S>, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let keys = crate::ecdh::make_key_pair(curve, rng)?;
        Ok(Self {
            curve,
            secret: *keys.secret_key(),
            verifying_key: VerifyingKey {
                curve,
                point: *keys.public_key(),
            },
        })
    }

    /// Wrap a secret scalar in `[1, n − 1]`.
    pub fn from_secret(curve: &'a CurveParams<N, S>, secret: Uint<S>) -> Result<Self> {
        let point = crate::ecdh::compute_public_key(curve, &secret)?;
        Ok(Self {
            curve,
            secret,
            verifying_key: VerifyingKey { curve, point },
        })
    }

    /// Parse a big-endian secret scalar of [`CurveParams::field_bytes`]
    /// bytes.
    pub fn from_bytes(curve: &'a CurveParams<N, S>, bytes: &[u8]) -> Result<Self> {
        Self::from_secret(curve, curve.decode_scalar(bytes)?)
    }

    /// The secret scalar.
    pub fn secret_scalar(&self) -> &Uint<S> {
        &self.secret
    }

    /// The matching verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<'a, N, S> {
        &self.verifying_key
    }

    /// The curve this key belongs to.
    pub fn curve(&self) -> &'a CurveParams<N, S> {
        self.curve
    }
}

impl<const N: usize, const S: usize> core::fmt::Debug for SigningKey<'_, N, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("curve", &self.curve.name())
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<const N: usize, const S: usize> Drop for SigningKey<'_, N, S> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl<const N: usize, const S: usize> ZeroizeOnDrop for SigningKey<'_, N, S> {}

impl<const N: usize, const S: usize> RandomizedPrehashSigner<Signature<S>>
    for SigningKey<'_, N, S>
{
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature<S>> {
        Ok(sign(self.curve, &self.secret, prehash, rng)?)
    }
}

/// Deterministic signing with RFC 6979 nonces derived using HMAC-SHA-256.
#[cfg(feature = "sha256")]
#[cfg_attr(docsrs, doc(cfg(feature = "sha256")))]
impl<const N: usize, const S: usize> PrehashSigner<Signature<S>> for SigningKey<'_, N, S> {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature<S>> {
        Ok(sign_deterministic::<Sha256, N, S>(self.curve, &self.secret, prehash)?)
    }
}

#[cfg(feature = "sha256")]
#[cfg_attr(docsrs, doc(cfg(feature = "sha256")))]
impl<const N: usize, const S: usize> Signer<Signature<S>> for SigningKey<'_, N, S> {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature<S>> {
        self.sign_prehash(&Sha256::digest(msg))
    }
}

#[cfg(feature = "sha256")]
#[cfg_attr(docsrs, doc(cfg(feature = "sha256")))]
impl<const N: usize, const S: usize> RandomizedSigner<Signature<S>> for SigningKey<'_, N, S> {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature<S>> {
        self.sign_prehash_with_rng(rng, &Sha256::digest(msg))
    }
}

/// ECDSA verifying key: a validated public point bound to its curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyingKey<'a, const N: usize, const S: usize> {
    curve: &'a CurveParams<N, S>,
    point: AffinePoint<N>,
}

impl<'a, const N: usize, const S: usize> VerifyingKey<'a, N, S> {
    /// Wrap a public point, which must be a valid curve point.
    pub fn from_affine(curve: &'a CurveParams<N, S>, point: AffinePoint<N>) -> Result<Self> {
        if curve.is_valid_point(&point) {
            Ok(Self { curve, point })
        } else {
            Err(Error::InvalidPublicKey)
        }
    }

    /// Parse an uncompressed (`x ‖ y`) or compressed (tag ‖ `x`) public
    /// key, told apart by length.
    pub fn from_bytes(curve: &'a CurveParams<N, S>, bytes: &[u8]) -> Result<Self> {
        let point = if bytes.len() == curve.compressed_point_bytes() {
            curve.decompress_point(bytes)?
        } else {
            curve.decode_point(bytes)?
        };
        Self::from_affine(curve, point)
    }

    /// The public point.
    pub fn as_affine(&self) -> &AffinePoint<N> {
        &self.point
    }

    /// The curve this key belongs to.
    pub fn curve(&self) -> &'a CurveParams<N, S> {
        self.curve
    }
}

impl<const N: usize, const S: usize> PrehashVerifier<Signature<S>> for VerifyingKey<'_, N, S> {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature<S>) -> signature::Result<()> {
        if verify(self.curve, &self.point, prehash, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

#[cfg(feature = "sha256")]
#[cfg_attr(docsrs, doc(cfg(feature = "sha256")))]
impl<const N: usize, const S: usize> Verifier<Signature<S>> for VerifyingKey<'_, N, S> {
    fn verify(&self, msg: &[u8], signature: &Signature<S>) -> signature::Result<()> {
        self.verify_prehash(&Sha256::digest(msg), signature)
    }
}
