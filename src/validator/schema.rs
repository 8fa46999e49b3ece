use super::CaptureKey;
use crate::ber::{Class, Tag};

/// Expected shape of a node in a decoded tree
///
/// Unset fields match anything. Schemas are plain data: they are built with
/// `const fn` methods, and usually stored in `static` items.
#[derive(Clone, Copy, Debug)]
pub struct Schema {
    /// Name used in mismatch messages
    pub name: &'static str,
    pub class: Option<Class>,
    pub tag: Option<Tag>,
    pub constructed: Option<bool>,
    /// A non-matching optional child is skipped instead of failing the match
    pub optional: bool,
    /// Capture the content octets (or the object, if constructed)
    pub capture: Option<CaptureKey>,
    /// Capture the whole object
    pub capture_asn1: Option<CaptureKey>,
    /// Capture the raw BIT STRING content, unused-bits octet included
    pub capture_bitstring_contents: Option<CaptureKey>,
    /// Capture the BIT STRING value, without the unused-bits octet
    pub capture_bitstring_value: Option<CaptureKey>,
    /// Expected children, in order
    pub children: Option<&'static [Schema]>,
}

impl Schema {
    /// A schema matching any object
    pub const fn any(name: &'static str) -> Self {
        Schema {
            name,
            class: None,
            tag: None,
            constructed: None,
            optional: false,
            capture: None,
            capture_asn1: None,
            capture_bitstring_contents: None,
            capture_bitstring_value: None,
            children: None,
        }
    }

    /// A schema matching a universal object with the given tag
    pub const fn universal(name: &'static str, tag: Tag, constructed: bool) -> Self {
        Schema {
            class: Some(Class::Universal),
            tag: Some(tag),
            constructed: Some(constructed),
            ..Schema::any(name)
        }
    }

    /// A schema matching a SEQUENCE with the given children
    pub const fn sequence(name: &'static str, children: &'static [Schema]) -> Self {
        Schema::universal(name, Tag::Sequence, true).with_children(children)
    }

    pub const fn with_class(self, class: Class) -> Self {
        Schema {
            class: Some(class),
            ..self
        }
    }

    pub const fn with_tag(self, tag: Tag) -> Self {
        Schema {
            tag: Some(tag),
            ..self
        }
    }

    pub const fn with_constructed(self, constructed: bool) -> Self {
        Schema {
            constructed: Some(constructed),
            ..self
        }
    }

    pub const fn with_children(self, children: &'static [Schema]) -> Self {
        Schema {
            children: Some(children),
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Schema {
            optional: true,
            ..self
        }
    }

    pub const fn capture(self, key: CaptureKey) -> Self {
        Schema {
            capture: Some(key),
            ..self
        }
    }

    pub const fn capture_asn1(self, key: CaptureKey) -> Self {
        Schema {
            capture_asn1: Some(key),
            ..self
        }
    }

    pub const fn capture_bitstring_contents(self, key: CaptureKey) -> Self {
        Schema {
            capture_bitstring_contents: Some(key),
            ..self
        }
    }

    pub const fn capture_bitstring_value(self, key: CaptureKey) -> Self {
        Schema {
            capture_bitstring_value: Some(key),
            ..self
        }
    }
}
