#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate hex_literal;

use der_keys::ber::*;
use der_keys::der::*;
use der_keys::error::*;
use der_keys::pem;
use nom::Err;

#[test]
fn test_sequence() {
    let bytes = hex!("30 03 02 01 05");
    let (rem, obj) = parse_der(&bytes).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.header.class, Class::Universal);
    assert_eq!(obj.header.tag, Tag::Sequence);
    assert!(obj.header.constructed);
    let children = obj.as_sequence().expect("not a SEQUENCE");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].header.tag, Tag::Integer);
    assert_eq!(children[0].as_slice(), Ok(&[0x05][..]));
    assert_eq!(obj, BerObject::from_seq(vec![BerObject::from_u64(5)]));
    assert_eq!(obj.to_vec().expect("encoding failed"), bytes);
}

#[test]
fn test_set() {
    let bytes = hex!("31 06 02 01 01 02 01 02");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    let children = obj.as_set().expect("not a SET");
    assert_eq!(children.len(), 2);
    assert_eq!(obj.as_sequence(), Err(BerError::BerTypeError));
    let values: Vec<_> = obj.ref_iter().map(|o| o.as_u32()).collect();
    assert_eq!(values, vec![Ok(1), Ok(2)]);
}

#[test]
fn test_offsets() {
    let bytes = hex!("30 08 02 01 05 30 03 01 01 ff");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    assert_eq!(obj.raw_range(), 0..10);
    assert_eq!(obj[1].raw_range(), 5..10);
    assert_eq!(obj[1].content_range(), 7..10);
    assert_eq!(obj[1][0].offset, 7);
    assert_eq!(&bytes[obj[1][0].content_range()], &[0xff]);
}

#[test]
fn test_indefinite_equals_definite() {
    let definite = hex!("30 08 02 01 05 04 03 56 78 90");
    let indefinite = hex!("30 80 02 01 05 04 03 56 78 90 00 00");
    let (_, a) = parse_der(&definite).expect("parsing failed");
    let (rem, b) = parse_ber(&indefinite).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(a, b);
    assert_eq!(a.children(), b.children());
    assert_eq!(b.header.length, Length::Indefinite);
    assert_eq!(b.raw_range(), 0..12);
    // encoding always uses the definite form
    assert_eq!(b.to_vec().expect("encoding failed"), definite);
}

#[test]
fn test_nested_indefinite() {
    let bytes = hex!("30 80 31 80 02 01 01 00 00 a0 80 05 00 00 00 00 00 02 01 07");
    let (rem, obj) = parse_ber(&bytes).expect("parsing failed");
    assert_eq!(rem, &hex!("02 01 07"));
    assert_eq!(obj.children().len(), 2);
    assert_eq!(obj[0][0].as_u64(), Ok(1));
    let (tag, inner) = obj[1].as_context_specific().expect("not context-specific");
    assert_eq!(tag, Tag(0));
    assert_eq!(inner, Some(&BerObject::null()));
}

#[test]
fn test_indefinite_child_roundtrip() {
    // indefinite SEQUENCE inside a definite one: the parent shrinks on encoding
    let bytes = hex!("30 06 30 80 05 00 00 00");
    let (_, tree) = parse_ber(&bytes).expect("parsing failed");
    let encoded = tree.to_vec().expect("encoding failed");
    assert_eq!(encoded, hex!("30 04 30 02 05 00"));
    let (_, again) = parse_ber(&encoded).expect("parsing failed");
    assert_eq!(again, tree);

    // same shape, wrapped in an OCTET STRING
    let bytes = hex!("04 06 30 80 05 00 00 00");
    let (_, tree) = parse_ber(&bytes).expect("parsing failed");
    assert!(tree.is_encapsulated());
    assert_eq!(tree.children()[0].header.length, Length::Indefinite);
    let encoded = tree.to_vec().expect("encoding failed");
    assert_eq!(encoded, hex!("04 04 30 02 05 00"));
    let (_, again) = parse_ber(&encoded).expect("parsing failed");
    assert!(again.is_encapsulated());
    assert_eq!(again, tree);
}

#[test]
fn test_indefinite_missing_end_of_content() {
    let bytes = hex!("30 80 02 01 05");
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::UnexpectedEof)));
}

#[test]
fn test_child_length_mismatch() {
    let bytes = hex!("30 03 02 02 01 02 01");
    assert_eq!(
        parse_ber(&bytes),
        Err(Err::Error(BerError::LengthMismatch {
            declared: 2,
            actual: 1
        }))
    );
    let (rem, obj) = parse_ber_with_options(&bytes, &DecodeOptions::lenient()).expect("parsing failed");
    assert_eq!(rem, &hex!("02 01"));
    assert_eq!(obj[0].as_u64(), Ok(1));
}

#[test]
fn test_truncated_strict_and_lenient() {
    let bytes = hex!("30 06 02 01 05 02 03 01");
    assert!(parse_ber(&bytes).is_err());
    assert!(parse_der(&bytes).is_err());
    let (rem, obj) = parse_ber_with_options(&bytes, &DecodeOptions::lenient()).expect("parsing failed");
    assert!(rem.is_empty());
    assert_eq!(obj.children().len(), 2);
    assert_eq!(obj[0].as_u64(), Ok(5));
    assert_eq!(obj[1].as_u64(), Ok(1));
}

#[test]
fn test_max_depth() {
    let mut bytes = Vec::new();
    for _ in 0..70 {
        bytes.extend_from_slice(&[0x30, 0x80]);
    }
    for _ in 0..70 {
        bytes.extend_from_slice(&[0x00, 0x00]);
    }
    assert_eq!(parse_ber(&bytes), Err(Err::Error(BerError::MaxDepth)));
    let options = DecodeOptions::default().with_max_depth(100);
    let (rem, _) = parse_ber_with_options(&bytes, &options).expect("parsing failed");
    assert!(rem.is_empty());
}

#[test]
fn test_encapsulated_bitstring() {
    let bytes = hex!(
        "30 1b 30 0d 06 09 2a 86 48 86 f7 0d 01 01 01 05 00
         03 0a 00 30 07 02 02 0c a1 02 01 11"
    );
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    let bs = &obj[1];
    assert!(bs.is_encapsulated());
    assert!(!bs.is_constructed());
    assert_eq!(bs.children().len(), 1);
    assert_eq!(bs[0][0].as_u64(), Ok(3233));
    assert_eq!(bs[0][1].as_u64(), Ok(17));
    assert_eq!(bs.bit_string_contents.as_deref(), Some(&bytes[19..]));
    assert_eq!(obj.to_vec().expect("encoding failed"), bytes);

    let options = DecodeOptions::der().with_decode_bit_strings(false);
    let (_, raw) = parse_ber_with_options(&bytes, &options).expect("parsing failed");
    assert!(!raw[1].is_encapsulated());
    assert!(raw[1].children().is_empty());
    assert_eq!(raw.to_vec().expect("encoding failed"), bytes);
}

#[test]
fn test_encapsulated_octetstring() {
    let bytes = hex!("04 05 30 03 02 01 05");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    assert!(obj.is_encapsulated());
    assert_eq!(obj.as_slice(), Ok(&bytes[2..]));
    assert_eq!(obj[0], BerObject::from_seq(vec![BerObject::from_u64(5)]));
}

#[test]
fn test_encapsulation_rejected() {
    // trailing byte after the nested object
    let bytes = hex!("04 06 30 03 02 01 05 ff");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    assert!(!obj.is_encapsulated());
    assert_eq!(obj.as_slice(), Ok(&bytes[2..]));
    // application class
    let bytes = hex!("04 02 60 00");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    assert!(!obj.is_encapsulated());
    // non-zero unused bits
    let bytes = hex!("03 03 01 05 00");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    assert!(!obj.is_encapsulated());
    assert_eq!(obj.to_vec().expect("encoding failed"), bytes);
}

#[test]
fn test_tagged_explicit() {
    let bytes = hex!("a0 03 02 01 05");
    let (_, obj) = parse_der(&bytes).expect("parsing failed");
    assert_eq!(obj, BerObject::from_tagged_explicit(0, BerObject::from_u64(5)));
    assert_eq!(
        BerObject::from_tagged_explicit(0, BerObject::from_u64(5)).to_vec().expect("encoding failed"),
        bytes
    );
}

#[test]
fn test_parse_all() {
    let bytes = hex!("02 01 01 05 00 30 00");
    let v = parse_ber_all(&bytes, &DecodeOptions::default()).expect("parsing failed");
    assert_eq!(v.len(), 3);
    assert_eq!(v[2], BerObject::from_seq(vec![]));
    assert_eq!(
        decode_with_options(&bytes, &DecodeOptions::default()),
        Err(BerError::TrailingData(4))
    );
}

#[test]
fn test_roundtrip_pkcs8_key() {
    let pem = pem::decode(include_str!("data/rsa512-pkcs8.pem")).expect("invalid PEM");
    let obj = from_der(&pem.contents).expect("parsing failed");
    assert!(obj[2].is_encapsulated());
    assert_eq!(obj[2][0].children().len(), 9);
    let der = obj.to_vec().expect("encoding failed");
    assert_eq!(der, pem.contents);
    let (_, again) = parse_der(&der).expect("parsing failed");
    assert_eq!(again, obj);
}

#[test]
fn test_roundtrip_owned() {
    let bytes = hex!("30 80 04 03 56 78 90 1e 02 00 41 00 00");
    let obj = {
        let copy = bytes.to_vec();
        let (_, obj) = parse_ber(&copy).expect("parsing failed");
        obj.into_owned()
    };
    let der = obj.to_vec().expect("encoding failed");
    assert_eq!(der, hex!("30 09 04 03 56 78 90 1e 02 00 41"));
    let (_, decoded) = parse_der(&der).expect("parsing failed");
    assert_eq!(decoded, obj);
}
