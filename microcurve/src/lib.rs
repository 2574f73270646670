//! Compact, allocation-free elliptic curve cryptography over short
//! Weierstrass curves, including support for the
//! [Elliptic Curve Digital Signature Algorithm (ECDSA)][ECDSA] and
//! [Elliptic Curve Diffie-Hellman (ECDH)][ECDH].
//!
//! ## Supported curves
//!
//! | Curve       | Field words `N` | Scalar words `S` | Constant            |
//! |-------------|-----------------|------------------|---------------------|
//! | secp160r1   | 5               | 6                | [`SECP160R1`]       |
//! | secp192r1   | 6               | 6                | [`SECP192R1`]       |
//! | secp224r1   | 7               | 7                | [`SECP224R1`]       |
//! | secp256r1   | 8               | 8                | [`SECP256R1`]       |
//! | secp256k1   | 8               | 8                | [`SECP256K1`]       |
//! | secp384r1   | 12              | 12               | [`SECP384R1`]       |
//!
//! Parameters are from Certicom's SECG
//! "SEC 2: Recommended Elliptic Curve Domain Parameters":
//!
//! <https://www.secg.org/sec2-v2.pdf>
//!
//! All arithmetic is generic over the number of 32-bit words and shared by
//! every curve; each curve only contributes its constants and its choice of
//! fast modular reduction. The curve is an ordinary value passed to every
//! operation, so one binary can speak all of them.
//!
//! ## Usage
//!
//! ```
//! # #[cfg(all(feature = "ecdsa", feature = "getrandom"))]
//! # {
//! use microcurve::{ecdh, ecdsa, rand_core::OsRng, SECP256R1};
//!
//! let keys = ecdh::make_key_pair(&SECP256R1, &mut OsRng).unwrap();
//!
//! let hash = [0x42; 32];
//! let signature = ecdsa::sign(&SECP256R1, keys.secret_key(), &hash, &mut OsRng).unwrap();
//! assert!(ecdsa::verify(&SECP256R1, keys.public_key(), &hash, &signature));
//! # }
//! ```
//!
//! ## ⚠️ Security Warning
//!
//! The elliptic curve arithmetic contained in this crate has never been
//! independently audited!
//!
//! This crate has been designed with the goal of ensuring that secret-dependent
//! operations are performed in constant time (using the `subtle` crate, a
//! Montgomery ladder of fixed length, and scalar blinding before inversion).
//! However, it has not been thoroughly assessed to ensure that generated
//! assembly is constant time on common CPU architectures.
//!
//! Public keys received from a peer are not validated implicitly: call
//! [`CurveParams::is_valid_point`] first.
//!
//! USE AT YOUR OWN RISK!
//!
//! ## Minimum Supported Rust Version
//!
//! Rust **1.65** or higher.
//!
//! Minimum supported Rust version may be changed in the future, but it will be
//! accompanied with a minor version bump.
//!
//! [ECDSA]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
//! [ECDH]: https://en.wikipedia.org/wiki/Elliptic-curve_Diffie%E2%80%93Hellman

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/microcurve/0.1.0-pre")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;
pub mod ecdh;
pub mod rng;

#[cfg(feature = "ecdsa")]
#[cfg_attr(docsrs, doc(cfg(feature = "ecdsa")))]
pub mod ecdsa;

#[cfg(any(feature = "test-vectors", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-vectors")))]
pub mod test_vectors;

mod curves;
mod encoding;
mod error;

pub use crate::{
    arithmetic::{AffinePoint, PrimeField, Reduction, Uint, WideUint, Word, WORD_BITS, WORD_BYTES},
    curves::{
        CurveParams, EquationA, SECP160R1, SECP192R1, SECP224R1, SECP256K1, SECP256R1, SECP384R1,
    },
    error::{Error, Result},
    rng::{FnRng, MAX_TRIES},
};
pub use rand_core;
pub use subtle;

#[cfg(feature = "zeroize")]
pub use zeroize;
