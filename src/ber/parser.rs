use crate::ber::integer::bytes_to_u64;
use crate::ber::*;
use crate::cursor::ByteCursor;
use crate::error::*;
use log::debug;
use nom::bytes::streaming::take;
use nom::number::streaming::be_u8;
use nom::Err;
use rusticata_macros::custom_check;
use std::borrow::Cow;
use std::convert::TryFrom;

/// Default maximum nesting depth
pub const MAX_RECURSION: usize = 64;

/// Largest number of octets accepted in a long-form length
pub const MAX_LENGTH_OCTETS: usize = 6;

/// Decoder settings
///
/// `strict` turns the recoverable encoding problems (overlong definite
/// lengths, indefinite primitive values, odd BMPString lengths) into errors
/// instead of working around them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject encodings that lenient mode would repair
    pub strict: bool,
    /// Fail if bytes are left after the top-level object
    pub parse_all_bytes: bool,
    /// Try to decode the content of BIT STRING and OCTET STRING values as
    /// nested objects
    pub decode_bit_strings: bool,
    /// Maximum nesting depth
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict: true,
            parse_all_bytes: false,
            decode_bit_strings: true,
            max_depth: MAX_RECURSION,
        }
    }
}

impl DecodeOptions {
    /// Settings for a complete DER value: strict, with no trailing bytes
    pub const fn der() -> Self {
        DecodeOptions {
            strict: true,
            parse_all_bytes: true,
            decode_bit_strings: true,
            max_depth: MAX_RECURSION,
        }
    }

    /// Accept (and repair) malformed lengths
    pub const fn lenient() -> Self {
        DecodeOptions {
            strict: false,
            parse_all_bytes: false,
            decode_bit_strings: true,
            max_depth: MAX_RECURSION,
        }
    }

    pub const fn with_strict(self, strict: bool) -> Self {
        DecodeOptions { strict, ..self }
    }

    pub const fn with_parse_all_bytes(self, parse_all_bytes: bool) -> Self {
        DecodeOptions {
            parse_all_bytes,
            ..self
        }
    }

    pub const fn with_decode_bit_strings(self, decode_bit_strings: bool) -> Self {
        DecodeOptions {
            decode_bit_strings,
            ..self
        }
    }

    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        DecodeOptions { max_depth, ..self }
    }
}

/// Parse the identifier octets: class, constructed flag and tag number
///
/// High tag numbers that do not fit in a `u64` are rejected as soon as the
/// accumulator would overflow.
pub(crate) fn parse_identifier(i: &[u8]) -> BerResult<(Class, bool, Tag)> {
    let (mut rem, b0) = be_u8(i)?;
    let class = Class::try_from(b0 >> 6).or(Err(Err::Error(BerError::InvalidClass)))?;
    let constructed = b0 & 0b0010_0000 != 0;
    let low = b0 & 0b0001_1111;
    if low != 0x1f {
        return Ok((rem, (class, constructed, Tag(u64::from(low)))));
    }
    let mut acc: u64 = 0;
    loop {
        let (r, b) = be_u8(rem)?;
        rem = r;
        if acc > (u64::MAX >> 7) {
            return Err(Err::Error(BerError::InvalidTag));
        }
        acc = (acc << 7) | u64::from(b & 0x7f);
        if b & 0x80 == 0 {
            break;
        }
    }
    Ok((rem, (class, constructed, Tag(acc))))
}

/// Parse the length octets
pub(crate) fn parse_ber_length(i: &[u8]) -> BerResult<Length> {
    let (i, b0) = be_u8(i)?;
    if b0 & 0x80 == 0 {
        return Ok((i, Length::Definite(usize::from(b0))));
    }
    let count = usize::from(b0 & 0x7f);
    if count == 0 {
        return Ok((i, Length::Indefinite));
    }
    custom_check!(i, count > MAX_LENGTH_OCTETS, BerError::LengthTooBig)?;
    let (i, llen) = take(count)(i)?;
    let len = bytes_to_u64(llen).map_err(Err::Error)?;
    let len = usize::try_from(len).or(Err(Err::Error(BerError::LengthTooBig)))?;
    Ok((i, Length::Definite(len)))
}

/// Read an object header
pub fn ber_read_element_header(i: &[u8]) -> BerResult<Header> {
    let (rem, (class, constructed, tag)) = parse_identifier(i)?;
    let (rem, length) = parse_ber_length(rem)?;
    let header = Header {
        class,
        constructed,
        tag,
        length,
        header_length: i.len() - rem.len(),
    };
    Ok((rem, header))
}

struct Decoder<'a> {
    cur: ByteCursor<'a>,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    /// Decode one object, using at most `remaining` bytes from the cursor
    fn decode(&mut self, remaining: usize, depth: usize) -> Result<BerObject<'a>, BerError> {
        if depth > self.options.max_depth {
            return Err(BerError::MaxDepth);
        }
        let offset = self.cur.position();
        let window = self.cur.peek(remaining.min(self.cur.remaining()))?;
        let (_, mut header) = ber_read_element_header(window)?;
        self.cur.skip(header.header_length)?;
        let available = remaining - header.header_length;

        let length = match header.length {
            Length::Definite(len) if len > available => {
                if self.options.strict {
                    return Err(if len > self.cur.remaining() {
                        BerError::LengthExceedsBuffer
                    } else {
                        BerError::LengthMismatch {
                            declared: len,
                            actual: available,
                        }
                    });
                }
                debug!(
                    "declared length {} exceeds the {} bytes available, truncating",
                    len, available
                );
                header.length = Length::Definite(available);
                Some(available)
            }
            Length::Definite(len) => Some(len),
            Length::Indefinite => None,
        };

        let content_start = self.cur.position();
        let (content, bit_string_contents) = if header.constructed {
            let children = match length {
                Some(len) => self.decode_children(len, depth)?,
                None => self.decode_children_indefinite(available, depth)?,
            };
            (BerObjectContent::Constructed(children), None)
        } else {
            let len = match length {
                Some(len) => len,
                None if self.options.strict => return Err(BerError::IndefiniteLengthUnexpected),
                None => {
                    debug!("indefinite length on primitive value, using the remaining {} bytes", available);
                    header.length = Length::Definite(available);
                    available
                }
            };
            self.decode_primitive(&header, len, depth)?
        };

        Ok(BerObject {
            header,
            offset,
            content_length: self.cur.position() - content_start,
            content,
            bit_string_contents,
        })
    }

    fn decode_children(&mut self, len: usize, depth: usize) -> Result<Vec<BerObject<'a>>, BerError> {
        let mut children = Vec::new();
        let mut left = len;
        while left > 0 {
            let start = self.cur.position();
            let child = self.decode(left, depth + 1)?;
            left -= self.cur.position() - start;
            children.push(child);
        }
        Ok(children)
    }

    fn decode_children_indefinite(
        &mut self,
        mut available: usize,
        depth: usize,
    ) -> Result<Vec<BerObject<'a>>, BerError> {
        let mut children = Vec::new();
        loop {
            if available < 2 {
                return Err(BerError::UnexpectedEof);
            }
            if self.cur.peek(2)? == [0, 0] {
                self.cur.skip(2)?;
                return Ok(children);
            }
            let start = self.cur.position();
            let child = self.decode(available, depth + 1)?;
            available -= self.cur.position() - start;
            children.push(child);
        }
    }

    #[allow(clippy::type_complexity)]
    fn decode_primitive(
        &mut self,
        header: &Header,
        len: usize,
        depth: usize,
    ) -> Result<(BerObjectContent<'a>, Option<Cow<'a, [u8]>>), BerError> {
        if !header.is_universal() {
            let raw = self.cur.read_bytes(len)?;
            return Ok((BerObjectContent::Primitive(Cow::Borrowed(raw)), None));
        }
        match header.tag {
            Tag::BitString | Tag::OctetString => {
                let raw = self.cur.peek(len)?;
                let bit_string_contents = if header.tag == Tag::BitString {
                    if self.options.strict && raw.first().map_or(true, |&b| b > 7) {
                        return Err(BerError::InvalidEncapsulation);
                    }
                    Some(Cow::Borrowed(raw))
                } else {
                    None
                };
                if self.options.decode_bit_strings && len > 1 {
                    if let Some(inner) = self.probe_encapsulated(header.tag, len, depth) {
                        return Ok((
                            BerObjectContent::Encapsulated(Cow::Borrowed(raw), Box::new(inner)),
                            bit_string_contents,
                        ));
                    }
                }
                self.cur.skip(len)?;
                Ok((BerObjectContent::Primitive(Cow::Borrowed(raw)), bit_string_contents))
            }
            Tag::BmpString => {
                let raw = self.cur.read_bytes(len)?;
                let text = decode_bmp(raw, self.options.strict)?;
                Ok((BerObjectContent::BmpString(Cow::Borrowed(raw), text), None))
            }
            _ => {
                let raw = self.cur.read_bytes(len)?;
                Ok((BerObjectContent::Primitive(Cow::Borrowed(raw)), None))
            }
        }
    }

    /// Try to decode the content of a string value as a single nested object
    ///
    /// The attempt runs in strict mode. It is kept only if it consumes the
    /// whole content and yields a universal or context-specific object;
    /// otherwise the cursor is restored and `None` is returned.
    fn probe_encapsulated(&mut self, tag: Tag, len: usize, depth: usize) -> Option<BerObject<'a>> {
        let saved = self.cur.position();
        let mut inner_len = len;
        if tag == Tag::BitString {
            match self.cur.read_byte() {
                Ok(0) => inner_len -= 1,
                _ => {
                    self.cur.set_position(saved);
                    return None;
                }
            }
        }
        let outer_options = self.options;
        self.options.strict = true;
        let start = self.cur.position();
        let result = self.decode(inner_len, depth + 1);
        let consumed = self.cur.position() - start;
        self.options = outer_options;
        match result {
            Ok(inner)
                if consumed == inner_len
                    && !inner.header.is_end_of_content()
                    && (inner.header.is_universal() || inner.header.is_contextspecific()) =>
            {
                Some(inner)
            }
            Ok(_) => {
                self.cur.set_position(saved);
                None
            }
            Err(e) => {
                debug!("{:?} content is not an encapsulated object: {}", tag, e);
                self.cur.set_position(saved);
                None
            }
        }
    }
}

fn decode_bmp(raw: &[u8], strict: bool) -> Result<String, BerError> {
    if raw.len() % 2 != 0 && strict {
        return Err(BerError::InvalidString);
    }
    let units = raw.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]]));
    if strict {
        std::char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .or(Err(BerError::InvalidString))
    } else {
        Ok(std::char::decode_utf16(units)
            .map(|r| r.unwrap_or(std::char::REPLACEMENT_CHARACTER))
            .collect())
    }
}

/// Decode one object with the given options
///
/// Returns the bytes following the object. If `parse_all_bytes` is set, any
/// such bytes are an error.
pub fn parse_ber_with_options<'a>(i: &'a [u8], options: &DecodeOptions) -> BerResult<'a, BerObject<'a>> {
    let mut decoder = Decoder {
        cur: ByteCursor::new(i),
        options: *options,
    };
    let obj = decoder.decode(i.len(), 0).map_err(Err::Error)?;
    let rem = decoder.cur.rest();
    if options.parse_all_bytes && !rem.is_empty() {
        return Err(Err::Error(BerError::TrailingData(rem.len())));
    }
    Ok((rem, obj))
}

/// Parse BER object recursively, with the default (strict) options
///
/// Return a tuple containing the remaining (unparsed) bytes and the BER Object, or an error.
///
/// *Note*: this is the same as calling `parse_ber_with_options` with `DecodeOptions::default()`.
#[inline]
pub fn parse_ber(i: &[u8]) -> BerResult<BerObject> {
    parse_ber_with_options(i, &DecodeOptions::default())
}

/// Decode a complete buffer holding exactly one object
pub fn decode_with_options<'a>(i: &'a [u8], options: &DecodeOptions) -> Result<BerObject<'a>, BerError> {
    let options = options.with_parse_all_bytes(true);
    parse_ber_with_options(i, &options)
        .map(|(_, obj)| obj)
        .map_err(BerError::from)
}

/// Parse a sequence of objects until the input is exhausted
pub fn parse_ber_all<'a>(mut i: &'a [u8], options: &DecodeOptions) -> Result<Vec<BerObject<'a>>, BerError> {
    let options = options.with_parse_all_bytes(false);
    let mut v = Vec::new();
    while !i.is_empty() {
        let (rem, obj) = parse_ber_with_options(i, &options)?;
        v.push(obj);
        i = rem;
    }
    Ok(v)
}
