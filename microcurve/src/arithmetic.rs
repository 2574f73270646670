//! Fixed-width integer, prime field and curve group arithmetic.

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod jacobian;
pub(crate) mod modular;
pub(crate) mod mul;
pub(crate) mod reduce;
pub(crate) mod uint;

pub use affine::AffinePoint;
pub use field::PrimeField;
pub use reduce::Reduction;
pub use uint::{Uint, WideUint, Word, WORD_BITS, WORD_BYTES};

pub(crate) use uint::WideWord;
