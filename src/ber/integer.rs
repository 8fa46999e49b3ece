use crate::error::*;
use num_bigint::BigUint;

/// Try to parse input bytes as u64
#[inline]
pub(crate) fn bytes_to_u64(s: &[u8]) -> Result<u64, BerError> {
    let mut u: u64 = 0;
    for &c in s {
        if u & 0xff00_0000_0000_0000 != 0 {
            return Err(BerError::IntegerTooLarge);
        }
        u <<= 8;
        u |= u64::from(c);
    }
    Ok(u)
}

/// Decode an unsigned DER integer into a u64
pub(crate) fn decode_array_uint8(mut bytes: &[u8]) -> Result<u64, BerError> {
    // Check if MSB is set *before* leading zeroes
    if is_highest_bit_set(bytes) {
        return Err(BerError::IntegerNegative);
    }
    while bytes.len() > 1 && bytes[0] == 0 {
        bytes = &bytes[1..];
    }
    if bytes.len() > 8 {
        return Err(BerError::IntegerTooLarge);
    }
    bytes_to_u64(bytes)
}

/// Decode a non-negative DER integer of any size
pub(crate) fn decode_biguint(bytes: &[u8]) -> Result<BigUint, BerError> {
    if is_highest_bit_set(bytes) {
        return Err(BerError::IntegerNegative);
    }
    Ok(BigUint::from_bytes_be(bytes))
}

/// Is the highest bit of the first byte in the slice 1? (if present)
#[inline]
pub(crate) fn is_highest_bit_set(bytes: &[u8]) -> bool {
    bytes
        .first()
        .map(|byte| byte & 0b1000_0000 != 0)
        .unwrap_or(false)
}

/// Drop one redundant sign octet from a two's-complement integer encoding
///
/// A leading `00` followed by a byte with the high bit clear, or a leading
/// `ff` followed by a byte with the high bit set, carries no information.
pub fn trim_integer(bytes: &[u8]) -> &[u8] {
    if bytes.len() > 1
        && ((bytes[0] == 0x00 && bytes[1] & 0x80 == 0)
            || (bytes[0] == 0xff && bytes[1] & 0x80 == 0x80))
    {
        &bytes[1..]
    } else {
        bytes
    }
}

/// Big-endian two's-complement encoding of a non-negative integer
///
/// A `00` octet is prepended when the most significant bit of the magnitude
/// is set, so that the value reads back as positive.
pub fn biguint_to_der_bytes(v: &BigUint) -> Vec<u8> {
    let mut bytes = v.to_bytes_be();
    if is_highest_bit_set(&bytes) {
        bytes.insert(0, 0);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_integer() {
        assert_eq!(trim_integer(&[0x00, 0x7f]), &[0x7f]);
        assert_eq!(trim_integer(&[0x00, 0x80]), &[0x00, 0x80]);
        assert_eq!(trim_integer(&[0xff, 0x80]), &[0x80]);
        assert_eq!(trim_integer(&[0xff, 0x7f]), &[0xff, 0x7f]);
        assert_eq!(trim_integer(&[0x00]), &[0x00]);
        assert_eq!(trim_integer(&[]), &[] as &[u8]);
    }

    #[test]
    fn test_biguint_to_der_bytes() {
        assert_eq!(biguint_to_der_bytes(&BigUint::from(0u32)), vec![0x00]);
        assert_eq!(biguint_to_der_bytes(&BigUint::from(0x7fu32)), vec![0x7f]);
        assert_eq!(biguint_to_der_bytes(&BigUint::from(0x80u32)), vec![0x00, 0x80]);
        assert_eq!(
            biguint_to_der_bytes(&BigUint::from(0x010001u32)),
            vec![0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn test_decode_uint() {
        assert_eq!(decode_array_uint8(&[0x01, 0x00, 0x01]), Ok(0x10001));
        assert_eq!(decode_array_uint8(&[0x00, 0xff]), Ok(0xff));
        assert_eq!(decode_array_uint8(&[0x80]), Err(BerError::IntegerNegative));
        assert_eq!(
            decode_array_uint8(&[0x01, 0, 0, 0, 0, 0, 0, 0, 0]),
            Err(BerError::IntegerTooLarge)
        );
    }
}
