use super::integer::{biguint_to_der_bytes, decode_array_uint8, decode_biguint};
use super::{Class, Header, Length, Tag};
use crate::error::{BerError, SerializeResult};
use crate::oid::Oid;
use num_bigint::{BigInt, BigUint};
use std::borrow::Cow;
use std::ops::{Index, Range};

/// Representation of a decoded (or built) BER object
///
/// Content borrows from the decoded buffer where possible. Objects built in
/// memory own their bytes, and can be mixed freely with borrowed ones.
#[derive(Clone, Debug)]
pub struct BerObject<'a> {
    pub header: Header,
    /// Position of the identifier octet in the decoded buffer (0 for built objects)
    pub offset: usize,
    /// Number of bytes between the end of the header and the end of the object
    ///
    /// For indefinite-length values, this is computed after decoding and
    /// includes the end-of-contents octets.
    pub content_length: usize,
    pub content: BerObjectContent<'a>,
    /// Verbatim content of a decoded BIT STRING (unused-bits octet included)
    ///
    /// When present, the encoder writes these bytes back instead of
    /// re-encoding the value, so signatures over them are preserved.
    pub bit_string_contents: Option<Cow<'a, [u8]>>,
}

/// BER object content
#[derive(Clone, Debug, PartialEq)]
pub enum BerObjectContent<'a> {
    /// Raw content octets of a primitive value
    ///
    /// For a BIT STRING, the first octet is the unused-bits count.
    Primitive(Cow<'a, [u8]>),
    /// BMPString: raw UTF-16BE octets and decoded text
    BmpString(Cow<'a, [u8]>, String),
    /// Children of a constructed value
    Constructed(Vec<BerObject<'a>>),
    /// A BIT STRING or OCTET STRING whose content is itself a DER object
    ///
    /// The first field holds the raw content octets, the second the decoded
    /// inner object.
    Encapsulated(Cow<'a, [u8]>, Box<BerObject<'a>>),
}

impl<'a> BerObject<'a> {
    /// Build a BerObject from a header and content.
    ///
    /// The constructed flag of the header is updated to match the content.
    pub fn from_header_and_content(header: Header, content: BerObjectContent<'a>) -> BerObject<'a> {
        let constructed = matches!(content, BerObjectContent::Constructed(_));
        BerObject {
            header: Header { constructed, ..header },
            offset: 0,
            content_length: 0,
            content,
            bit_string_contents: None,
        }
    }

    fn universal(tag: Tag, content: BerObjectContent<'a>) -> BerObject<'a> {
        BerObject::from_header_and_content(Header::universal(tag, false), content)
    }

    /// Build an INTEGER from its raw two's-complement content octets
    pub fn from_int_slice(i: &'a [u8]) -> BerObject<'a> {
        BerObject::universal(Tag::Integer, BerObjectContent::Primitive(Cow::Borrowed(i)))
    }

    /// Build a non-negative INTEGER
    pub fn from_biguint(v: &BigUint) -> BerObject<'static> {
        BerObject::universal(
            Tag::Integer,
            BerObjectContent::Primitive(Cow::Owned(biguint_to_der_bytes(v))),
        )
    }

    /// Build a non-negative INTEGER from a native value
    pub fn from_u64(v: u64) -> BerObject<'static> {
        BerObject::from_biguint(&BigUint::from(v))
    }

    /// Build a SEQUENCE
    pub fn from_seq(l: Vec<BerObject<'a>>) -> BerObject<'a> {
        BerObject::from_header_and_content(
            Header::universal(Tag::Sequence, true),
            BerObjectContent::Constructed(l),
        )
    }

    /// Build a SET
    pub fn from_set(l: Vec<BerObject<'a>>) -> BerObject<'a> {
        BerObject::from_header_and_content(
            Header::universal(Tag::Set, true),
            BerObjectContent::Constructed(l),
        )
    }

    /// Build a NULL value
    pub fn null() -> BerObject<'static> {
        BerObject::universal(Tag::Null, BerObjectContent::Primitive(Cow::Borrowed(&[])))
    }

    /// Build a BOOLEAN (DER form, `ff` for true)
    pub fn from_bool(b: bool) -> BerObject<'static> {
        let v: &'static [u8] = if b { &[0xff] } else { &[0x00] };
        BerObject::universal(Tag::Boolean, BerObjectContent::Primitive(Cow::Borrowed(v)))
    }

    /// Build an OBJECT IDENTIFIER
    pub fn from_oid(oid: Oid<'a>) -> BerObject<'a> {
        let tag = if oid.relative { Tag::RelativeOid } else { Tag::Oid };
        BerObject::universal(tag, BerObjectContent::Primitive(oid.asn1))
    }

    /// Build an OCTET STRING holding raw bytes
    pub fn from_octetstring<T: Into<Cow<'a, [u8]>>>(data: T) -> BerObject<'a> {
        BerObject::universal(Tag::OctetString, BerObjectContent::Primitive(data.into()))
    }

    /// Build a BIT STRING from its unused-bits count and data octets
    pub fn from_bitstring(unused_bits: u8, data: &[u8]) -> BerObject<'static> {
        let mut v = Vec::with_capacity(data.len() + 1);
        v.push(unused_bits);
        v.extend_from_slice(data);
        BerObject::universal(Tag::BitString, BerObjectContent::Primitive(Cow::Owned(v)))
    }

    /// Build a UTF8String
    pub fn from_utf8_str(s: &'a str) -> BerObject<'a> {
        BerObject::universal(
            Tag::Utf8String,
            BerObjectContent::Primitive(Cow::Borrowed(s.as_bytes())),
        )
    }

    /// Build a BMPString (UTF-16BE)
    pub fn from_bmp_str(s: &str) -> BerObject<'static> {
        let raw: Vec<u8> = s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
        BerObject::universal(
            Tag::BmpString,
            BerObjectContent::BmpString(Cow::Owned(raw), s.to_owned()),
        )
    }

    /// Build a BIT STRING (`tag` = `Tag::BitString`) or OCTET STRING wrapping
    /// an encoded object
    ///
    /// The raw content is computed now, so that it can be captured or compared
    /// like the content of a decoded object.
    pub fn encapsulating(tag: Tag, inner: BerObject<'a>) -> SerializeResult<BerObject<'a>> {
        let mut raw = Vec::new();
        if tag == Tag::BitString {
            raw.push(0);
        }
        raw.extend_from_slice(&inner.to_vec()?);
        Ok(BerObject::universal(
            tag,
            BerObjectContent::Encapsulated(Cow::Owned(raw), Box::new(inner)),
        ))
    }

    /// Build a context-specific constructed value (`[n] EXPLICIT`)
    pub fn from_tagged_explicit(tag: u64, inner: BerObject<'a>) -> BerObject<'a> {
        BerObject::from_header_and_content(
            Header::new(Class::ContextSpecific, true, Tag(tag), Length::Definite(0)),
            BerObjectContent::Constructed(vec![inner]),
        )
    }

    /// Detach the object from the buffer it was decoded from
    pub fn into_owned(self) -> BerObject<'static> {
        let content = match self.content {
            BerObjectContent::Primitive(c) => BerObjectContent::Primitive(Cow::Owned(c.into_owned())),
            BerObjectContent::BmpString(c, s) => {
                BerObjectContent::BmpString(Cow::Owned(c.into_owned()), s)
            }
            BerObjectContent::Constructed(v) => {
                BerObjectContent::Constructed(v.into_iter().map(BerObject::into_owned).collect())
            }
            BerObjectContent::Encapsulated(c, inner) => BerObjectContent::Encapsulated(
                Cow::Owned(c.into_owned()),
                Box::new(inner.into_owned()),
            ),
        };
        BerObject {
            header: self.header,
            offset: self.offset,
            content_length: self.content_length,
            content,
            bit_string_contents: self.bit_string_contents.map(|c| Cow::Owned(c.into_owned())),
        }
    }

    /// Tag number of the object
    #[inline]
    pub fn tag(&self) -> Tag {
        self.header.tag
    }

    /// Class of the object
    #[inline]
    pub fn class(&self) -> Class {
        self.header.class
    }

    /// Range of the whole encoding (header and content) in the decoded buffer
    pub fn raw_range(&self) -> Range<usize> {
        self.offset..self.offset + self.header.header_length + self.content_length
    }

    /// Range of the content octets in the decoded buffer
    pub fn content_range(&self) -> Range<usize> {
        let start = self.offset + self.header.header_length;
        start..start + self.content_length
    }

    /// Raw content octets of a primitive (or encapsulating) value
    pub fn as_slice(&self) -> Result<&[u8], BerError> {
        match &self.content {
            BerObjectContent::Primitive(s)
            | BerObjectContent::BmpString(s, _)
            | BerObjectContent::Encapsulated(s, _) => Ok(s),
            BerObjectContent::Constructed(_) => Err(BerError::ConstructUnexpected),
        }
    }

    /// Child objects: the list of a constructed value, the inner object of an
    /// encapsulating one, and nothing for other primitives
    pub fn children(&self) -> &[BerObject<'a>] {
        match &self.content {
            BerObjectContent::Constructed(v) => v,
            BerObjectContent::Encapsulated(_, inner) => std::slice::from_ref(inner.as_ref()),
            _ => &[],
        }
    }

    /// Children of a SEQUENCE
    pub fn as_sequence(&self) -> Result<&[BerObject<'a>], BerError> {
        self.constructed_as(Tag::Sequence)
    }

    /// Children of a SET
    pub fn as_set(&self) -> Result<&[BerObject<'a>], BerError> {
        self.constructed_as(Tag::Set)
    }

    fn constructed_as(&self, tag: Tag) -> Result<&[BerObject<'a>], BerError> {
        match &self.content {
            BerObjectContent::Constructed(v) if self.header.tag == tag => Ok(v),
            _ => Err(BerError::BerTypeError),
        }
    }

    fn expect_universal(&self, tag: Tag) -> Result<&[u8], BerError> {
        if !self.header.is_universal() || self.header.tag != tag {
            return Err(BerError::BerTypeError);
        }
        self.as_slice()
    }

    /// Attempt to read an unsigned integer value from an INTEGER or ENUMERATED
    ///
    /// Negative values are rejected. Values larger than `u64` return
    /// `IntegerTooLarge`, use [`as_biguint`](Self::as_biguint) instead.
    pub fn as_u64(&self) -> Result<u64, BerError> {
        match self.header.tag {
            Tag::Integer | Tag::Enumerated if self.header.is_universal() => {
                decode_array_uint8(self.as_slice()?)
            }
            _ => Err(BerError::BerTypeError),
        }
    }

    /// Attempt to read an unsigned integer value that fits in a u32
    pub fn as_u32(&self) -> Result<u32, BerError> {
        let v = self.as_u64()?;
        if v > u64::from(u32::MAX) {
            return Err(BerError::IntegerTooLarge);
        }
        Ok(v as u32)
    }

    /// Read an INTEGER as an unsigned big integer
    ///
    /// Negative values (high bit of the first octet set) are rejected.
    pub fn as_biguint(&self) -> Result<BigUint, BerError> {
        let s = self.expect_universal(Tag::Integer)?;
        decode_biguint(s)
    }

    /// Read an INTEGER as a signed big integer
    pub fn as_bigint(&self) -> Result<BigInt, BerError> {
        let s = self.expect_universal(Tag::Integer)?;
        Ok(BigInt::from_signed_bytes_be(s))
    }

    /// Read a BOOLEAN. Any non-zero octet is true.
    pub fn as_bool(&self) -> Result<bool, BerError> {
        match self.expect_universal(Tag::Boolean)? {
            [b] => Ok(*b != 0),
            _ => Err(BerError::InvalidLength),
        }
    }

    /// Attempt to read an OBJECT IDENTIFIER (or RELATIVE-OID)
    pub fn as_oid(&self) -> Result<Oid<'_>, BerError> {
        match self.header.tag {
            Tag::Oid if self.header.is_universal() => Ok(Oid::new(Cow::Borrowed(self.as_slice()?))),
            Tag::RelativeOid if self.header.is_universal() => {
                Ok(Oid::new_relative(Cow::Borrowed(self.as_slice()?)))
            }
            _ => Err(BerError::BerTypeError),
        }
    }

    /// Read a BIT STRING
    pub fn as_bitstring(&self) -> Result<BitStringObject<'_>, BerError> {
        let s = match &self.bit_string_contents {
            Some(s) => s.as_ref(),
            None => self.expect_universal(Tag::BitString)?,
        };
        match s.split_first() {
            Some((&unused_bits, data)) if unused_bits < 8 => Ok(BitStringObject { unused_bits, data }),
            _ => Err(BerError::InvalidEncapsulation),
        }
    }

    /// Read a character string
    ///
    /// All the 8-bit string types and the time types are checked as UTF-8.
    /// BMPString returns the decoded text.
    pub fn as_str(&self) -> Result<&str, BerError> {
        if !self.header.is_universal() {
            return Err(BerError::BerTypeError);
        }
        match (&self.content, self.header.tag) {
            (BerObjectContent::BmpString(_, s), _) => Ok(s),
            (
                BerObjectContent::Primitive(s),
                Tag::Utf8String
                | Tag::NumericString
                | Tag::PrintableString
                | Tag::T61String
                | Tag::VideotexString
                | Tag::Ia5String
                | Tag::UtcTime
                | Tag::GeneralizedTime
                | Tag::GraphicString
                | Tag::VisibleString
                | Tag::GeneralString
                | Tag::ObjDescriptor,
            ) => std::str::from_utf8(s).map_err(|_| BerError::InvalidString),
            _ => Err(BerError::BerTypeError),
        }
    }

    /// For a context-specific value, return the tag and the first child
    pub fn as_context_specific(&self) -> Result<(Tag, Option<&BerObject<'a>>), BerError> {
        if !self.header.is_contextspecific() {
            return Err(BerError::BerTypeError);
        }
        Ok((self.header.tag, self.children().first()))
    }

    /// Test if object class is Universal
    #[inline]
    pub fn is_universal(&self) -> bool {
        self.header.is_universal()
    }
    /// Test if object class is Context-specific
    #[inline]
    pub fn is_contextspecific(&self) -> bool {
        self.header.is_contextspecific()
    }
    /// Test if object is constructed
    #[inline]
    pub fn is_constructed(&self) -> bool {
        self.header.is_constructed()
    }
    /// Test if the content of this object was decoded as a nested object
    #[inline]
    pub fn is_encapsulated(&self) -> bool {
        matches!(self.content, BerObjectContent::Encapsulated(..))
    }

    pub fn ref_iter(&self) -> std::slice::Iter<'_, BerObject<'a>> {
        self.children().iter()
    }
}

impl<'a> From<Oid<'a>> for BerObject<'a> {
    fn from(oid: Oid<'a>) -> BerObject<'a> {
        BerObject::from_oid(oid)
    }
}

/// Compare two objects, ignoring their position in the decoded buffer.
///
/// `bit_string_contents` is compared only if both sides carry it, so that a
/// decoded tree compares equal to the tree it was encoded from.
impl<'a, 'b> PartialEq<BerObject<'b>> for BerObject<'a> {
    fn eq(&self, other: &BerObject<'b>) -> bool {
        self.header == other.header
            && content_eq(&self.content, &other.content)
            && match (&self.bit_string_contents, &other.bit_string_contents) {
                (Some(a), Some(b)) => a.as_ref() == b.as_ref(),
                _ => true,
            }
    }
}

fn content_eq(a: &BerObjectContent<'_>, b: &BerObjectContent<'_>) -> bool {
    use BerObjectContent::*;
    match (a, b) {
        (Primitive(x), Primitive(y)) => x.as_ref() == y.as_ref(),
        (BmpString(x, s), BmpString(y, t)) => x.as_ref() == y.as_ref() && s == t,
        (Constructed(x), Constructed(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(c, d)| c == d)
        }
        (Encapsulated(_, x), Encapsulated(_, y)) => x.as_ref() == y.as_ref(),
        _ => false,
    }
}

impl<'a> Index<usize> for BerObject<'a> {
    type Output = BerObject<'a>;

    fn index(&self, idx: usize) -> &BerObject<'a> {
        match self.children().get(idx) {
            Some(o) => o,
            None => panic!("Try to index BerObject which has no child at {}", idx),
        }
    }
}

/// BitString wrapper
#[derive(Clone, Debug, PartialEq)]
pub struct BitStringObject<'a> {
    /// Number of padding bits in the last octet
    pub unused_bits: u8,
    pub data: &'a [u8],
}

impl<'a> BitStringObject<'a> {
    /// Test if bit `bitnum` is set
    pub fn is_set(&self, bitnum: usize) -> bool {
        let byte_pos = bitnum / 8;
        if byte_pos >= self.data.len() {
            return false;
        }
        let b = 7 - (bitnum % 8);
        (self.data[byte_pos] & (1 << b)) != 0
    }
}

impl<'a> AsRef<[u8]> for BitStringObject<'a> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use crate::ber::*;
    use crate::oid::*;
    use num_bigint::BigUint;

    #[test]
    fn test_der_as_u64() {
        let der_obj = BerObject::from_int_slice(b"\x01\x00\x02");
        assert_eq!(der_obj.as_u64(), Ok(0x10002));
        let neg = BerObject::from_int_slice(b"\xff");
        assert_eq!(neg.as_u64(), Err(BerError::IntegerNegative));
        let big = BerObject::from_int_slice(b"\x01\x02\x03\x04\x05\x06\x07\x08\x09");
        assert_eq!(big.as_u64(), Err(BerError::IntegerTooLarge));
        assert_eq!(BerObject::null().as_u64(), Err(BerError::BerTypeError));
    }

    #[test]
    fn test_der_seq_iter() {
        let der_obj = BerObject::from_seq(vec![
            BerObject::from_int_slice(b"\x01\x00\x01"),
            BerObject::from_int_slice(b"\x01\x00\x00"),
        ]);
        let expected_values = vec![
            BerObject::from_int_slice(b"\x01\x00\x01"),
            BerObject::from_int_slice(b"\x01\x00\x00"),
        ];

        for (idx, v) in der_obj.ref_iter().enumerate() {
            assert_eq!(*v, expected_values[idx]);
        }
        assert_eq!(der_obj[1], expected_values[1]);
        assert!(der_obj.is_constructed());
    }

    #[test]
    fn test_der_from_oid() {
        let obj: BerObject = Oid::from(&[1, 2]).unwrap().into();
        assert_eq!(obj.tag(), Tag::Oid);
        assert_eq!(obj.as_oid().unwrap(), Oid::from(&[1, 2]).unwrap());
    }

    #[test]
    fn test_der_bistringobject() {
        let obj = BitStringObject {
            unused_bits: 0,
            data: &[0x0f, 0x00, 0x40],
        };
        assert!(!obj.is_set(0));
        assert!(obj.is_set(7));
        assert!(!obj.is_set(9));
        assert!(obj.is_set(17));
    }

    #[test]
    fn test_der_as_bitstring() {
        let obj = BerObject::from_bitstring(4, &[0xf0]);
        let bs = obj.as_bitstring().unwrap();
        assert_eq!(bs.unused_bits, 4);
        assert_eq!(bs.as_ref(), &[0xf0]);
    }

    #[test]
    fn test_der_to_biguint() {
        let obj = BerObject::from_int_slice(b"\x00\x81\x00\x01");
        assert_eq!(obj.as_biguint(), Ok(BigUint::from(0x81_0001u32)));
        let back = BerObject::from_biguint(&BigUint::from(0x81_0001u32));
        assert_eq!(back.as_slice(), Ok(&b"\x00\x81\x00\x01"[..]));
        let neg = BerObject::from_int_slice(b"\x81");
        assert_eq!(neg.as_biguint(), Err(BerError::IntegerNegative));
    }

    #[test]
    fn test_der_strings() {
        let obj = BerObject::from_bmp_str("h\u{e9}");
        assert_eq!(obj.as_slice(), Ok(&[0x00, 0x68, 0x00, 0xe9][..]));
        assert_eq!(obj.as_str(), Ok("h\u{e9}"));
        assert_eq!(BerObject::from_utf8_str("abc").as_str(), Ok("abc"));
        assert_eq!(
            BerObject::from_int_slice(b"\x01").as_str(),
            Err(BerError::BerTypeError)
        );
    }

    #[test]
    fn test_der_encapsulating() {
        let inner = BerObject::from_seq(vec![BerObject::from_u64(5)]);
        let obj = BerObject::encapsulating(Tag::BitString, inner.clone()).unwrap();
        assert_eq!(obj.as_slice(), Ok(&[0x00, 0x30, 0x03, 0x02, 0x01, 0x05][..]));
        assert_eq!(obj.children(), &[inner][..]);
        assert!(!obj.is_constructed());
    }

    #[test]
    fn test_der_bool_and_context() {
        assert_eq!(BerObject::from_bool(true).as_bool(), Ok(true));
        let tagged = BerObject::from_tagged_explicit(0, BerObject::null());
        let (tag, inner) = tagged.as_context_specific().unwrap();
        assert_eq!(tag, Tag(0));
        assert_eq!(inner, Some(&BerObject::null()));
    }
}
