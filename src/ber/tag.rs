use rusticata_macros::newtype_enum;

/// BER/DER Tag number as defined in X.680 section 8.4
///
/// Tag numbers above 30 use the "high tag number" form, a base-128 varint
/// following the identifier octet. X.690 sets no upper bound; numbers that do
/// not fit in a `u64` are rejected by the decoder.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u64);

newtype_enum! {
impl debug Tag {
    EndOfContent = 0x0,
    Boolean = 0x1,
    Integer = 0x2,
    BitString = 0x3,
    OctetString = 0x4,
    Null = 0x05,
    Oid = 0x06,
    ObjDescriptor = 0x07,
    External = 0x08,
    RealType = 0x09,
    Enumerated = 0xa,
    EmbeddedPdv = 0xb,
    Utf8String = 0xc,
    RelativeOid = 0xd,

    Sequence = 0x10,
    Set = 0x11,
    NumericString = 0x12,
    PrintableString = 0x13,
    T61String = 0x14,
    VideotexString = 0x15,

    Ia5String = 0x16,
    UtcTime = 0x17,
    GeneralizedTime = 0x18,

    GraphicString = 25, // 0x19
    VisibleString = 26, // 0x1a
    GeneralString = 27, // 0x1b

    UniversalString = 0x1c,
    BmpString = 0x1e,
}
}

impl Tag {
    /// Largest tag number that fits in the low-tag-number form
    pub const MAX_SHORT: u64 = 30;

    /// True if this tag number needs the high-tag-number form
    #[inline]
    pub const fn is_long_form(self) -> bool {
        self.0 > Tag::MAX_SHORT
    }
}

impl From<u64> for Tag {
    fn from(v: u64) -> Self {
        Tag(v)
    }
}

impl From<u32> for Tag {
    fn from(v: u32) -> Self {
        Tag(u64::from(v))
    }
}
