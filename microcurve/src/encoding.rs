//! Big-endian octet-string encodings of scalars and points.
//!
//! Every field element and scalar occupies [`CurveParams::field_bytes`]
//! bytes. Points are either uncompressed, `x ‖ y` without a tag byte, or
//! compressed, a `0x02`/`0x03` tag carrying the parity of `y` followed by
//! `x`.

use crate::{AffinePoint, CurveParams, Error, Result, Uint, Word};
use subtle::Choice;

/// Tag byte of a compressed point with even `y`; odd `y` sets the low bit.
const COMPRESSED_TAG: u8 = 0x02;

impl<const N: usize, const S: usize> CurveParams<N, S> {
    /// Size of an uncompressed point.
    pub const fn point_bytes(&self) -> usize {
        2 * self.field_bytes()
    }

    /// Size of a compressed point.
    pub const fn compressed_point_bytes(&self) -> usize {
        self.field_bytes() + 1
    }

    /// Write `scalar` into `out`, which must be exactly
    /// [`CurveParams::field_bytes`] long.
    ///
    /// A scalar wider than `8 · field_bytes` bits is refused with
    /// [`Error::Encoding`]. Only secp160r1, whose order has one bit more than
    /// its field, has such scalars below `n`; keys from
    /// [`make_key_pair`](crate::ecdh::make_key_pair) and signatures never use
    /// them.
    pub fn encode_scalar(&self, scalar: &Uint<S>, out: &mut [u8]) -> Result<()> {
        let high = scalar.as_words()[N.min(S)..].iter().fold(0, |acc: Word, &w| acc | w);
        if out.len() != self.field_bytes() || high != 0 {
            return Err(Error::Encoding);
        }
        scalar.write_be_bytes(out);
        Ok(())
    }

    /// Read a scalar from exactly [`CurveParams::field_bytes`] bytes. The
    /// value is not range checked.
    pub fn decode_scalar(&self, bytes: &[u8]) -> Result<Uint<S>> {
        if bytes.len() != self.field_bytes() {
            return Err(Error::Encoding);
        }
        Uint::from_be_slice(bytes)
    }

    /// Write `point` as `x ‖ y` into `out`, which must be exactly
    /// [`CurveParams::point_bytes`] long.
    pub fn encode_point(&self, point: &AffinePoint<N>, out: &mut [u8]) -> Result<()> {
        if out.len() != self.point_bytes() {
            return Err(Error::Encoding);
        }
        let (x, y) = out.split_at_mut(self.field_bytes());
        point.x.write_be_bytes(x);
        point.y.write_be_bytes(y);
        Ok(())
    }

    /// Read a point encoded as `x ‖ y`.
    ///
    /// Only the length is checked: use [`CurveParams::is_valid_point`]
    /// before trusting the result.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<AffinePoint<N>> {
        if bytes.len() != self.point_bytes() {
            return Err(Error::Encoding);
        }
        let (x, y) = bytes.split_at(self.field_bytes());
        Ok(AffinePoint::new(
            Uint::from_be_slice(x)?,
            Uint::from_be_slice(y)?,
        ))
    }

    /// Write the compressed form of `point` into `out`, which must be
    /// exactly [`CurveParams::compressed_point_bytes`] long.
    pub fn compress_point(&self, point: &AffinePoint<N>, out: &mut [u8]) -> Result<()> {
        if out.len() != self.compressed_point_bytes() {
            return Err(Error::Encoding);
        }
        out[0] = COMPRESSED_TAG | point.y.is_odd().unwrap_u8();
        point.x.write_be_bytes(&mut out[1..]);
        Ok(())
    }

    /// Recover a point from its compressed form.
    ///
    /// Fails on a wrong length, an unknown tag, or `x ≥ p`. Whether `x`
    /// belongs to a curve point is not checked (no square root exists
    /// otherwise, and the result is then off the curve):
    /// [`CurveParams::is_valid_point`] tells.
    pub fn decompress_point(&self, bytes: &[u8]) -> Result<AffinePoint<N>> {
        if bytes.len() != self.compressed_point_bytes() || bytes[0] & !1 != COMPRESSED_TAG {
            return Err(Error::Encoding);
        }

        let x = Uint::from_be_slice(&bytes[1..])?;
        if !bool::from(self.field().contains(&x)) {
            return Err(Error::Encoding);
        }

        Ok(AffinePoint::decompress(self, &x, Choice::from(bytes[0] & 1)))
    }
}

#[cfg(test)]
mod tests {
    use crate::curves::{SECP160R1, SECP224R1, SECP256R1, SECP384R1};
    use crate::{Error, Uint};
    use hex_literal::hex;

    // SEC 2 secp256r1 generator
    const G_COMPRESSED: [u8; 33] =
        hex!("036B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296");

    #[test]
    fn generator_compression() {
        let g = SECP256R1.generator();
        let mut out = [0u8; 33];
        SECP256R1.compress_point(g, &mut out).unwrap();
        assert_eq!(out, G_COMPRESSED);
        assert_eq!(SECP256R1.decompress_point(&out).unwrap(), *g);
    }

    #[test]
    fn uncompressed_layout() {
        let g = SECP160R1.generator();
        let mut out = [0u8; 40];
        SECP160R1.encode_point(g, &mut out).unwrap();
        assert_eq!(
            out,
            hex!(
                "4A96B5688EF573284664698968C38BB913CBFC82"
                "23A628553168947D59DCC912042351377AC5FB32"
            )
        );
        assert_eq!(SECP160R1.decode_point(&out).unwrap(), *g);
    }

    #[test]
    fn scalar_width_is_field_width() {
        // secp160r1 scalars live in six words but serialize in 20 bytes
        let k = Uint::<6>::from_be_hex("000000000102030405060708090A0B0C0D0E0F1011121314");
        let mut out = [0u8; 20];
        SECP160R1.encode_scalar(&k, &mut out).unwrap();
        assert_eq!(out, hex!("0102030405060708090A0B0C0D0E0F1011121314"));
        assert_eq!(SECP160R1.decode_scalar(&out).unwrap(), k);
        assert_eq!(SECP160R1.decode_scalar(&out[1..]), Err(Error::Encoding));
    }

    #[test]
    fn scalar_wider_than_field_is_refused() {
        // 2^160 + 1 is a valid secp160r1 secret that does not fit in 20 bytes
        let k = Uint::<6>::from_words([1, 0, 0, 0, 0, 1]);
        assert!(bool::from(SECP160R1.is_valid_scalar(&k)));
        let keys = crate::ecdh::KeyPair::from_secret(&SECP160R1, k).unwrap();

        let mut out = [0u8; 20];
        assert_eq!(
            SECP160R1.encode_scalar(keys.secret_key(), &mut out),
            Err(Error::Encoding)
        );
        assert_eq!(out, [0u8; 20]);
    }

    #[test]
    fn bad_lengths_and_tags() {
        let mut short = [0u8; 48];
        let g = SECP384R1.generator();
        assert_eq!(SECP384R1.encode_point(g, &mut short), Err(Error::Encoding));
        assert_eq!(SECP384R1.compress_point(g, &mut short), Err(Error::Encoding));
        assert_eq!(SECP384R1.decode_point(&short), Err(Error::Encoding));

        let mut compressed = [0u8; 29];
        SECP224R1
            .compress_point(SECP224R1.generator(), &mut compressed)
            .unwrap();
        for tag in [0x00, 0x01, 0x04, 0x06, 0xFF] {
            compressed[0] = tag;
            assert_eq!(SECP224R1.decompress_point(&compressed), Err(Error::Encoding));
        }
    }

    #[test]
    fn x_outside_field_is_rejected() {
        let mut bytes = [0xFFu8; 33];
        bytes[0] = 0x02;
        assert_eq!(SECP256R1.decompress_point(&bytes), Err(Error::Encoding));
    }
}
