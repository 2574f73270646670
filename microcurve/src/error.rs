//! Error types

use core::fmt::{self, Display};

/// Result type with the `microcurve` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The random number generator failed, or every candidate it produced
    /// was rejected within the retry bound.
    RngExhausted,

    /// Diffie-Hellman with the peer's public key produced the point at
    /// infinity.
    InvalidPeerKey,

    /// Secret scalar is zero or not below the curve order.
    InvalidSecretKey,

    /// Point is the identity, has a coordinate outside the field, or is not
    /// on the curve.
    InvalidPublicKey,

    /// Malformed byte encoding.
    Encoding,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::RngExhausted => "random number generator exhausted",
            Error::InvalidPeerKey => "invalid peer public key",
            Error::InvalidSecretKey => "invalid secret key",
            Error::InvalidPublicKey => "invalid public key",
            Error::Encoding => "malformed encoding",
        })
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

#[cfg(feature = "ecdsa")]
impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}
