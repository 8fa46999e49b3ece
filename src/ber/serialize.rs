use crate::ber::integer::trim_integer;
use crate::ber::*;
use crate::error::SerializeResult;
use crate::oid::encode_base128;
use cookie_factory::bytes::be_u8;
use cookie_factory::combinator::slice;
use cookie_factory::gen_simple;
use cookie_factory::sequence::tuple;
use cookie_factory::{SerializeFn, WriteContext};
use std::io::Write;

/// Encode the identifier octets
///
/// Tag numbers above 30 use the high-tag-number form.
fn ber_encode_identifier<'a, W: Write + 'a>(
    class: Class,
    constructed: bool,
    tag: Tag,
) -> impl SerializeFn<W> + 'a {
    move |out: WriteContext<W>| {
        let b0 = class.identifier_bits() | if constructed { 0b0010_0000 } else { 0 };
        if tag.is_long_form() {
            let mut v = vec![b0 | 0x1f];
            encode_base128(tag.0, &mut v);
            slice(v)(out)
        } else {
            be_u8(b0 | tag.0 as u8)(out)
        }
    }
}

/// Encode a definite length: short form up to 127, long form otherwise
pub fn ber_encode_length<'a, W: Write + 'a>(len: usize) -> impl SerializeFn<W> + 'a {
    move |out: WriteContext<W>| {
        if len <= 127 {
            be_u8(len as u8)(out)
        } else {
            let bytes = len.to_be_bytes();
            let skip = bytes.iter().take_while(|&&b| b == 0).count();
            let v = bytes[skip..].to_vec();
            tuple((be_u8(0x80 | v.len() as u8), slice(v)))(out)
        }
    }
}

/// Encoded length octets, as a vector
pub fn encode_length(len: usize) -> SerializeResult<Vec<u8>> {
    let v = gen_simple(ber_encode_length(len), Vec::new())?;
    Ok(v)
}

/// Content octets of an object, and the constructed flag to write
fn ber_encode_content(obj: &BerObject) -> SerializeResult<(bool, Vec<u8>)> {
    if let Some(raw) = &obj.bit_string_contents {
        return Ok((false, raw.to_vec()));
    }
    match &obj.content {
        BerObjectContent::Constructed(children) => {
            let mut v = Vec::new();
            for child in children {
                v.extend_from_slice(&ber_encode_object(child)?);
            }
            Ok((true, v))
        }
        BerObjectContent::Encapsulated(_, inner) => {
            let mut v = Vec::new();
            if obj.header.is_universal() && obj.header.tag == Tag::BitString {
                v.push(0);
            }
            v.extend_from_slice(&ber_encode_object(inner)?);
            Ok((false, v))
        }
        BerObjectContent::Primitive(s)
            if obj.header.is_universal() && obj.header.tag == Tag::Integer =>
        {
            Ok((false, trim_integer(s).to_vec()))
        }
        BerObjectContent::Primitive(s) | BerObjectContent::BmpString(s, _) => Ok((false, s.to_vec())),
    }
}

/// Encode a header and already-encoded content
pub fn ber_encode_header_and_content(
    class: Class,
    constructed: bool,
    tag: Tag,
    content: &[u8],
) -> SerializeResult<Vec<u8>> {
    let v = gen_simple(
        tuple((
            ber_encode_identifier(class, constructed, tag),
            ber_encode_length(content.len()),
            slice(content),
        )),
        Vec::new(),
    )?;
    Ok(v)
}

/// Encode an object tree to DER
///
/// Lengths are always definite and minimal, and INTEGER contents are trimmed.
/// A decoded BIT STRING is written back verbatim.
pub fn ber_encode_object(obj: &BerObject) -> SerializeResult<Vec<u8>> {
    let (constructed, content) = ber_encode_content(obj)?;
    ber_encode_header_and_content(obj.header.class, constructed, obj.header.tag, &content)
}

impl<'a> BerObject<'a> {
    /// Attempt to encode object as DER
    ///
    /// Note that the encoding will not check that the values of the `BerObject` fields are correct.
    pub fn to_vec(&self) -> SerializeResult<Vec<u8>> {
        ber_encode_object(self)
    }
}
