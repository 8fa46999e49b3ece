#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate hex_literal;

use der_keys::ber::*;
use der_keys::der::*;
use der_keys::error::*;
use der_keys::oid::Oid;
use nom::Err;
use std::borrow::Cow;
use test_case::test_case;

fn primitive(class: Class, tag: Tag, content: &[u8]) -> BerObject {
    BerObject::from_header_and_content(
        Header::new(class, false, tag, Length::Definite(0)),
        BerObjectContent::Primitive(Cow::Borrowed(content)),
    )
}

#[test]
fn test_bool() {
    let empty = &b""[..];
    assert_eq!(
        parse_der(&[0x01, 0x01, 0xff]),
        Ok((empty, BerObject::from_bool(true)))
    );
    let (_, obj) = parse_der(&[0x01, 0x01, 0x00]).expect("parsing failed");
    assert_eq!(obj.as_bool(), Ok(false));
    let (_, obj) = parse_ber(&[0x01, 0x02, 0x12, 0x34]).expect("parsing failed");
    assert_eq!(obj.as_bool(), Err(BerError::InvalidLength));
}

#[test_case(&hex!("02 01 05"), Ok(5) ; "small")]
#[test_case(&hex!("02 02 00 ff"), Ok(255) ; "sign octet")]
#[test_case(&hex!("02 09 00 ff ff ff ff ff ff ff ff"), Ok(u64::MAX) ; "u64 max")]
#[test_case(&hex!("02 01 ff"), Err(BerError::IntegerNegative) ; "negative")]
#[test_case(&hex!("02 09 01 00 00 00 00 00 00 00 00"), Err(BerError::IntegerTooLarge) ; "too large")]
#[test_case(&hex!("0a 01 03"), Ok(3) ; "enumerated")]
#[test_case(&hex!("04 01 03"), Err(BerError::BerTypeError) ; "not an integer")]
fn test_integer(i: &[u8], expected: Result<u64, BerError>) {
    let (rem, obj) = parse_der(i).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.as_u64(), expected);
}

#[test]
fn test_oid() {
    let empty = &b""[..];
    assert_eq!(
        parse_der(&[0x06, 0x06, 42, 129, 122, 1, 16, 9]),
        Ok((
            empty,
            BerObject::from_oid(Oid::from(&[1, 2, 250, 1, 16, 9]).unwrap())
        ))
    );
    let (_, obj) = parse_der(&hex!("06 09 2a 86 48 86 f7 0d 01 01 01")).expect("parsing failed");
    let oid = obj.as_oid().expect("not an OID");
    assert_eq!(oid.to_id_string(), "1.2.840.113549.1.1.1");
    assert_eq!(oid.name(), Some("rsaEncryption"));
}

#[test]
fn test_rel_oid() {
    let (_, obj) = parse_der(&[0x0d, 0x04, 0xc2, 0x7b, 0x03, 0x02]).expect("parsing failed");
    assert_eq!(obj.as_oid(), Ok(Oid::from_relative(&[8571, 3, 2]).unwrap()));
}

#[test]
fn test_null() {
    let empty = &b""[..];
    assert_eq!(parse_der(&[0x05, 0x00]), Ok((empty, BerObject::null())));
}

#[test]
fn test_unknown_tag() {
    let bytes = hex!("1d 01 00");
    let res = parse_ber(&bytes).expect("parsing failed");
    assert!(res.0.is_empty());
    assert_eq!(res.1, primitive(Class::Universal, Tag(0x1d), &bytes[2..]));
    let res = parse_der(&bytes).expect("parsing failed");
    assert_eq!(res.1, primitive(Class::Universal, Tag(0x1d), &bytes[2..]));
}

#[test]
fn test_unknown_context_specific() {
    let bytes = hex!("80 01 00");
    let (rem, obj) = parse_ber(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj, primitive(Class::ContextSpecific, Tag(0), &bytes[2..]));
    assert_eq!(obj.as_context_specific(), Ok((Tag(0), None)));
}

#[test]
fn test_unknown_long_tag() {
    let bytes = hex!("9f 22 01 00");
    let (rem, obj) = parse_ber(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj, primitive(Class::ContextSpecific, Tag(0x22), &bytes[3..]));
    assert_eq!(obj.header.header_length, 3);
}

#[test]
fn test_unknown_longer_tag() {
    let bytes = hex!("9f a2 22 01 00");
    let (rem, obj) = parse_ber(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj, primitive(Class::ContextSpecific, Tag(0x1122), &bytes[4..]));
    assert_eq!(obj.to_vec().expect("encoding failed"), bytes);
}

#[test]
fn test_incomplete_tag() {
    let bytes = hex!("9f a2 a2");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::UnexpectedEof)));
}

#[test]
fn test_overflow_tag() {
    let bytes = hex!("9f ff ff ff ff ff ff ff ff ff ff 7f 01 00");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::InvalidTag)));
}

#[test]
fn test_largest_tag() {
    let bytes = hex!("1f 81 ff ff ff ff ff ff ff ff 7f 00");
    let (rem, obj) = parse_ber(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.header.tag, Tag(u64::MAX));
}

#[test]
fn test_long_tag_run() {
    // rejected once the tag number no longer fits, without reading the whole run
    let mut bytes = vec![0x1f];
    bytes.extend(std::iter::repeat(0xff).take(100_000));
    bytes.extend_from_slice(&[0x7f, 0x00]);
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::InvalidTag)));
}

#[test]
fn test_incomplete_length() {
    let bytes = hex!("30");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::UnexpectedEof)));
    let bytes = hex!("02 82 01");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::UnexpectedEof)));
}

#[test]
fn test_length_too_big() {
    let bytes = hex!("04 87 00 00 00 00 00 00 01 00");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::LengthTooBig)));
}

#[test]
fn test_truncated_value() {
    let bytes = hex!("04 05 01 02 03");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::LengthExceedsBuffer)));
    let options = DecodeOptions::lenient();
    let (rem, obj) = parse_ber_with_options(&bytes, &options).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.as_slice(), Ok(&bytes[2..]));
    assert_eq!(obj.header.length, Length::Definite(3));
}

#[test]
fn test_indefinite_primitive() {
    let bytes = hex!("04 80 01 02");
    assert_eq!(
        parse_ber(&bytes),
        Err(Err::Error(BerError::IndefiniteLengthUnexpected))
    );
    let (rem, obj) = parse_ber_with_options(&bytes, &DecodeOptions::lenient()).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.as_slice(), Ok(&bytes[2..]));
}

#[test]
fn test_bitstring() {
    let bytes = hex!("03 04 06 6e 5d c0");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    let bs = obj.as_bitstring().expect("not a BIT STRING");
    assert_eq!(bs.unused_bits, 6);
    assert_eq!(bs.data, &bytes[3..]);
    assert!(bs.is_set(1));
    assert!(!bs.is_set(0));
    assert_eq!(obj.bit_string_contents.as_deref(), Some(&bytes[2..]));

    assert_eq!(parse_der(&hex!("03 00")), Err(Err::Error(BerError::InvalidEncapsulation)));
    assert_eq!(parse_der(&hex!("03 02 08 00")), Err(Err::Error(BerError::InvalidEncapsulation)));
    let (_, obj) = parse_ber_with_options(&hex!("03 02 08 00"), &DecodeOptions::lenient()).expect("parsing failed");
    assert_eq!(obj.as_bitstring(), Err(BerError::InvalidEncapsulation));
}

#[test]
fn test_strings() {
    let (_, obj) = parse_der(&hex!("0c 04 63 61 66 c3")).expect("parsing failed");
    assert_eq!(obj.as_str(), Err(BerError::InvalidString));
    let (_, obj) = parse_der(&hex!("13 03 61 62 63")).expect("parsing failed");
    assert_eq!(obj.as_str(), Ok("abc"));
}

#[test]
fn test_bmpstring() {
    // 2 characters, context-specific tag: kept as raw bytes
    let bytes = [0x80, 0x04, 0x00, 0x4c, 0x00, 0x65];
    let (rem, obj) = parse_ber(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.as_slice(), Ok(&bytes[2..]));

    let bytes = hex!("1e 06 79 3e 30 ba 30 fc");
    let (rem, obj) = parse_der(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.as_str(), Ok("\u{793e}\u{30ba}\u{30fc}"));
    assert_eq!(obj, BerObject::from_bmp_str("\u{793e}\u{30ba}\u{30fc}"));
    assert_eq!(obj.to_vec().expect("encoding failed"), bytes);
}

#[test]
fn test_bmpstring_odd_length() {
    let bytes = hex!("1e 03 00 4c 00");
    assert_eq!(parse_der(&bytes), Err(Err::Error(BerError::InvalidString)));
    let (_, obj) = parse_ber_with_options(&bytes, &DecodeOptions::lenient()).expect("parsing failed");
    assert_eq!(obj.as_str(), Ok("L"));
}
