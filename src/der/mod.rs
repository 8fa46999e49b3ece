//! Distinguished Encoding Rules (DER) objects and parser
//!
//! DER decoding uses the BER decoder (see the `ber` module) in strict mode,
//! and requires the input to hold exactly one object.
//!
//! The objects `BerObject` and `DerObject` are the same (type alias).

use crate::ber::{parse_ber_with_options, BerObject, DecodeOptions, Tag};
use crate::error::{BerError, BerResult};

/// DER tag (same as BER tag)
pub type DerTag = Tag;

/// Representation of a DER-encoded (X.690) object
///
/// Note that a DER object is just a BER object, with additional constraints.
pub type DerObject<'a> = BerObject<'a>;

/// Parse a DER object, expecting a value with no trailing bytes
///
/// Return a tuple containing the remaining (always empty) bytes and the object, or an error.
///
/// ```rust
/// use der_keys::parse_der;
///
/// let bytes = &[0x30, 0x03, 0x02, 0x01, 0x05];
/// let (rem, obj) = parse_der(bytes).expect("parsing failed");
/// assert!(rem.is_empty());
/// assert_eq!(obj[0].as_u64(), Ok(5));
/// ```
#[inline]
pub fn parse_der(i: &[u8]) -> BerResult<DerObject> {
    parse_ber_with_options(i, &DecodeOptions::der())
}

/// Decode a complete DER buffer
#[inline]
pub fn from_der(i: &[u8]) -> Result<DerObject, BerError> {
    parse_der(i).map(|(_, obj)| obj).map_err(BerError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_der_rejects_trailing_data() {
        let bytes = hex!("05 00 ff");
        assert_eq!(from_der(&bytes).unwrap_err(), BerError::TrailingData(1));
    }

    #[test]
    fn test_der_rejects_indefinite_primitive() {
        let bytes = hex!("04 80 01 02 00 00");
        assert_eq!(
            from_der(&bytes).unwrap_err(),
            BerError::IndefiniteLengthUnexpected
        );
    }
}
