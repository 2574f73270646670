//! Elliptic Curve Diffie-Hellman key agreement.
//!
//! ```
//! # #[cfg(feature = "getrandom")]
//! # {
//! use microcurve::{ecdh::KeyPair, rand_core::OsRng, SECP256R1};
//!
//! let alice = KeyPair::generate(&SECP256R1, &mut OsRng).unwrap();
//! let bob = KeyPair::generate(&SECP256R1, &mut OsRng).unwrap();
//!
//! // Public keys received from the other side must be validated first.
//! assert!(SECP256R1.is_valid_point(bob.public_key()));
//!
//! let alice_secret = alice.shared_secret(&SECP256R1, bob.public_key()).unwrap();
//! let bob_secret = bob.shared_secret(&SECP256R1, alice.public_key()).unwrap();
//! assert_eq!(alice_secret, bob_secret);
//! # }
//! ```

use crate::rng::{random_bits, random_nonzero_below, MAX_TRIES};
use crate::{AffinePoint, CurveParams, Error, Result, Uint};
use rand_core::CryptoRngCore;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Generate a secret key uniformly in `[1, n − 1]` together with its public
/// key.
///
/// Candidates are drawn with `8 · field_bytes` random bits and rejected
/// when zero, not below `n`, or mapping to the identity. After
/// [`MAX_TRIES`] rejected candidates, or as soon as `rng` reports a failure,
/// this returns [`Error::RngExhausted`].
pub fn make_key_pair<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    rng: &mut impl CryptoRngCore,
) -> Result<KeyPair<N, S>> {
    let bits = 8 * curve.field_bytes();

    for _ in 0..MAX_TRIES {
        let candidate = random_bits::<S>(rng, bits)?;
        if let Ok(keys) = KeyPair::from_secret(curve, candidate) {
            return Ok(keys);
        }
    }

    Err(Error::RngExhausted)
}

/// `secret · G`, for a secret in `[1, n − 1]`.
///
/// The range is checked in constant time; a secret outside it yields
/// [`Error::InvalidSecretKey`].
pub fn compute_public_key<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    secret: &Uint<S>,
) -> Result<AffinePoint<N>> {
    if !bool::from(curve.is_valid_scalar(secret)) {
        return Err(Error::InvalidSecretKey);
    }

    let public = curve.mul_base(secret);
    if bool::from(public.is_identity()) {
        return Err(Error::InvalidSecretKey);
    }

    Ok(public)
}

/// The `x` coordinate of `secret · peer`.
///
/// `peer` is assumed to be a valid point: check untrusted keys with
/// [`CurveParams::is_valid_point`] first. `blinding`, when present and
/// non-zero, randomizes the projective coordinates the ladder starts from;
/// it must be below `p`. A zero value is ignored.
///
/// Returns [`Error::InvalidPeerKey`] if the product is the identity.
pub fn shared_secret<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    peer: &AffinePoint<N>,
    secret: &Uint<S>,
    blinding: Option<&Uint<N>>,
) -> Result<Uint<N>> {
    if !bool::from(curve.is_valid_scalar(secret)) {
        return Err(Error::InvalidSecretKey);
    }

    let initial_z = blinding.filter(|z| !bool::from(z.is_zero()));
    let product = curve.mul_secret(peer, secret, initial_z);
    if bool::from(product.is_identity()) {
        return Err(Error::InvalidPeerKey);
    }

    Ok(product.x)
}

/// [`shared_secret`] with a fresh blinding value drawn from `rng`.
pub fn shared_secret_blinded<const N: usize, const S: usize>(
    curve: &CurveParams<N, S>,
    peer: &AffinePoint<N>,
    secret: &Uint<S>,
    rng: &mut impl CryptoRngCore,
) -> Result<Uint<N>> {
    let p = curve.field().modulus();
    let mut z = random_nonzero_below::<N>(rng, p.bits(), p)?;
    let result = shared_secret(curve, peer, secret, Some(&z));

    #[cfg(feature = "zeroize")]
    z.zeroize();

    result
}

/// A secret key and its public key.
///
/// The secret is zeroized on drop when the `zeroize` feature is enabled.
#[derive(Clone)]
pub struct KeyPair<const N: usize, const S: usize> {
    secret: Uint<S>,
    public: AffinePoint<N>,
}

impl<const N: usize, const S: usize> KeyPair<N, S> {
    /// Generate a random key pair with [`make_key_pair`].
    pub fn generate(curve: &CurveParams<N, S>, rng: &mut impl CryptoRngCore) -> Result<Self> {
        make_key_pair(curve, rng)
    }

    /// Derive the key pair of an existing secret.
    pub fn from_secret(curve: &CurveParams<N, S>, secret: Uint<S>) -> Result<Self> {
        let public = compute_public_key(curve, &secret)?;
        Ok(Self { secret, public })
    }

    /// The secret scalar.
    pub fn secret_key(&self) -> &Uint<S> {
        &self.secret
    }

    /// The public point.
    pub fn public_key(&self) -> &AffinePoint<N> {
        &self.public
    }

    /// Unblinded [`shared_secret`] with `peer`.
    pub fn shared_secret(
        &self,
        curve: &CurveParams<N, S>,
        peer: &AffinePoint<N>,
    ) -> Result<Uint<N>> {
        shared_secret(curve, peer, &self.secret, None)
    }
}

impl<const N: usize, const S: usize> core::fmt::Debug for KeyPair<N, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<const N: usize, const S: usize> Drop for KeyPair<N, S> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl<const N: usize, const S: usize> ZeroizeOnDrop for KeyPair<N, S> {}
