use super::{Class, Length, Tag};

/// BER object header (identifier and length)
#[derive(Clone, Copy, Debug)]
pub struct Header {
    /// Object class: universal, application, context-specific, or private
    pub class: Class,
    /// Constructed attribute: true if the value is a list of encoded objects
    pub constructed: bool,
    /// Tag number
    pub tag: Tag,
    /// Object length: definite or indefinite, as declared in the input
    pub length: Length,
    /// Number of bytes used by the identifier and length octets
    ///
    /// 0 for objects that were built rather than decoded.
    pub header_length: usize,
}

impl Header {
    /// Build a new BER header
    pub const fn new(class: Class, constructed: bool, tag: Tag, length: Length) -> Self {
        Header {
            class,
            constructed,
            tag,
            length,
            header_length: 0,
        }
    }

    /// Build a header for a UNIVERSAL object with the given tag
    pub const fn universal(tag: Tag, constructed: bool) -> Self {
        Header::new(Class::Universal, constructed, tag, Length::Definite(0))
    }

    /// Update header class
    #[inline]
    pub const fn with_class(self, class: Class) -> Self {
        Header { class, ..self }
    }

    /// Update header tag
    #[inline]
    pub const fn with_tag(self, tag: Tag) -> Self {
        Header { tag, ..self }
    }

    /// Update header length
    #[inline]
    pub const fn with_length(self, length: Length) -> Self {
        Header { length, ..self }
    }

    /// Test if object class is Universal
    #[inline]
    pub fn is_universal(&self) -> bool {
        self.class == Class::Universal
    }
    /// Test if object class is Application
    #[inline]
    pub fn is_application(&self) -> bool {
        self.class == Class::Application
    }
    /// Test if object class is Context-specific
    #[inline]
    pub fn is_contextspecific(&self) -> bool {
        self.class == Class::ContextSpecific
    }
    /// Test if object class is Private
    #[inline]
    pub fn is_private(&self) -> bool {
        self.class == Class::Private
    }

    /// Test if object is primitive
    #[inline]
    pub fn is_primitive(&self) -> bool {
        !self.constructed
    }
    /// Test if object is constructed
    #[inline]
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Test if this header is an end-of-contents marker (`00 00`)
    #[inline]
    pub fn is_end_of_content(&self) -> bool {
        self.class == Class::Universal
            && self.tag == Tag::EndOfContent
            && !self.constructed
            && self.length.is_null()
    }
}

/// Compare two BER headers. `length` fields are not compared: the encoded size
/// of a value depends on the length forms of its children, and the content
/// comparison of objects already covers the octets.
impl PartialEq for Header {
    fn eq(&self, other: &Header) -> bool {
        self.class == other.class && self.tag == other.tag && self.constructed == other.constructed
    }
}
