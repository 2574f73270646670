//! ECDSA across every curve.

#![cfg(feature = "ecdsa")]

use microcurve::{
    ecdh,
    ecdsa::{self, Signature, SigningKey, VerifyingKey},
    CurveParams, Error, FnRng,
};
use rand_core::{OsRng, RngCore};

/// Hash lengths exercised: shorter than, equal to and longer than the
/// scalar width of every curve.
const HASH_LENGTHS: [usize; 4] = [16, 20, 32, 64];

fn sign_and_verify<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
    let keys = ecdh::make_key_pair(curve, &mut OsRng).unwrap();
    let mut hash = [0u8; 64];

    for len in HASH_LENGTHS {
        OsRng.fill_bytes(&mut hash);
        let hash = &hash[..len];
        let signature = ecdsa::sign(curve, keys.secret_key(), hash, &mut OsRng).unwrap();
        assert!(ecdsa::verify(curve, keys.public_key(), hash, &signature));
    }

    // extreme hashes
    for hash in [[0u8; 64], [0xFFu8; 64]] {
        let hash = &hash[..4 * N];
        let signature = ecdsa::sign(curve, keys.secret_key(), hash, &mut OsRng).unwrap();
        assert!(ecdsa::verify(curve, keys.public_key(), hash, &signature));
    }
}

fn tampering<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
    let keys = ecdh::make_key_pair(curve, &mut OsRng).unwrap();
    let mut hash = [0u8; 48];
    OsRng.fill_bytes(&mut hash);
    let hash = &mut hash[..4 * N];
    let signature = ecdsa::sign(curve, keys.secret_key(), hash, &mut OsRng).unwrap();

    let mut bytes = [0u8; 96];
    let bytes = &mut bytes[..2 * curve.field_bytes()];
    signature.write_bytes(curve, bytes).unwrap();

    for _ in 0..8 {
        let bit = OsRng.next_u32() as usize % (8 * bytes.len());
        bytes[bit / 8] ^= 1 << (bit % 8);
        if let Ok(forged) = Signature::from_bytes(curve, bytes) {
            assert!(!ecdsa::verify(curve, keys.public_key(), hash, &forged));
        }
        bytes[bit / 8] ^= 1 << (bit % 8);

        let bit = OsRng.next_u32() as usize % (8 * hash.len());
        hash[bit / 8] ^= 1 << (bit % 8);
        assert!(!ecdsa::verify(curve, keys.public_key(), hash, &signature));
        hash[bit / 8] ^= 1 << (bit % 8);
    }

    assert!(ecdsa::verify(curve, keys.public_key(), hash, &signature));

    let other = ecdh::make_key_pair(curve, &mut OsRng).unwrap();
    assert!(!ecdsa::verify(curve, other.public_key(), hash, &signature));
}

fn stub_rngs<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
    let keys = ecdh::make_key_pair(curve, &mut OsRng).unwrap();
    let hash = [0x5Au8; 32];

    // every all-ones candidate is at least n
    let mut ones = FnRng(|buf: &mut [u8]| {
        buf.fill(0xFF);
        true
    });
    let mut zeros = FnRng(|buf: &mut [u8]| {
        buf.fill(0);
        true
    });
    let mut failing = FnRng(|_: &mut [u8]| false);

    for result in [
        ecdsa::sign(curve, keys.secret_key(), &hash, &mut ones),
        ecdsa::sign(curve, keys.secret_key(), &hash, &mut zeros),
        ecdsa::sign(curve, keys.secret_key(), &hash, &mut failing),
    ] {
        assert_eq!(result, Err(Error::RngExhausted));
    }
}

fn signature_traits<const N: usize, const S: usize>(curve: &CurveParams<N, S>) {
    use ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};

    let signing_key = SigningKey::random(curve, &mut OsRng).unwrap();
    let verifying_key = *signing_key.verifying_key();
    let hash = [0x11u8; 32];

    let signature = signing_key.sign_prehash_with_rng(&mut OsRng, &hash).unwrap();
    assert!(verifying_key.verify_prehash(&hash, &signature).is_ok());
    assert!(verifying_key.verify_prehash(&[0x12u8; 32], &signature).is_err());

    let mut compressed = [0u8; 49];
    let compressed = &mut compressed[..curve.compressed_point_bytes()];
    curve
        .compress_point(verifying_key.as_affine(), compressed)
        .unwrap();
    assert_eq!(VerifyingKey::from_bytes(curve, compressed), Ok(verifying_key));

    let mut secret = [0u8; 48];
    let secret = &mut secret[..curve.field_bytes()];
    curve
        .encode_scalar(signing_key.secret_scalar(), secret)
        .unwrap();
    let restored = SigningKey::from_bytes(curve, secret).unwrap();
    assert_eq!(*restored.verifying_key(), verifying_key);

    #[cfg(feature = "sha256")]
    {
        use ecdsa::signature::{hazmat::PrehashSigner, Signer, Verifier};

        let message = b"a message signed deterministically";
        let a: Signature<S> = signing_key.sign(message);
        let b: Signature<S> = restored.sign(message);
        assert_eq!(a, b);
        assert!(verifying_key.verify(message, &a).is_ok());
        assert!(verifying_key.verify(b"another message", &a).is_err());

        let prehashed: Signature<S> = signing_key.sign_prehash(&hash).unwrap();
        assert!(verifying_key.verify_prehash(&hash, &prehashed).is_ok());
    }
}

macro_rules! curve_tests {
    ($($name:ident => $curve:expr),+ $(,)?) => {
        $(
            mod $name {
                #[test]
                fn sign_and_verify() {
                    super::sign_and_verify(&$curve);
                }

                #[test]
                fn tampering() {
                    super::tampering(&$curve);
                }

                #[test]
                fn stub_rngs() {
                    super::stub_rngs(&$curve);
                }

                #[test]
                fn signature_traits() {
                    super::signature_traits(&$curve);
                }
            }
        )+
    };
}

curve_tests! {
    secp160r1 => microcurve::SECP160R1,
    secp192r1 => microcurve::SECP192R1,
    secp224r1 => microcurve::SECP224R1,
    secp256r1 => microcurve::SECP256R1,
    secp256k1 => microcurve::SECP256K1,
    secp384r1 => microcurve::SECP384R1,
}

#[test]
fn verify_rejects_invalid_public_key() {
    let curve = &microcurve::SECP256R1;
    let keys = ecdh::make_key_pair(curve, &mut OsRng).unwrap();
    let hash = [7u8; 32];
    let signature = ecdsa::sign(curve, keys.secret_key(), &hash, &mut OsRng).unwrap();

    let mut off_curve = *keys.public_key();
    off_curve.y = curve.field().add(&off_curve.y, &microcurve::Uint::ONE);
    assert!(!ecdsa::verify(curve, &off_curve, &hash, &signature));
    assert_eq!(
        VerifyingKey::from_affine(curve, off_curve),
        Err(Error::InvalidPublicKey)
    );
}
