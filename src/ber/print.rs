use crate::ber::{BerObject, BerObjectContent, Class, Tag};
use crate::oid::oid_name;
use rusticata_macros::debug::HexSlice;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrettyPrinterFlag {
    /// Print class, constructed flag and tag of every object
    ShowHeader,
    /// Print the offset and length of every object in the decoded buffer
    ShowOffsets,
}

/// Indented, multi-line representation of an object tree
///
/// Created by [`BerObject::as_pretty`].
pub struct PrettyBer<'a> {
    obj: &'a BerObject<'a>,
    indent: usize,
    inc: usize,

    flags: Vec<PrettyPrinterFlag>,
}

impl<'a> BerObject<'a> {
    pub fn as_pretty(&'a self, indent: usize, increment: usize) -> PrettyBer<'a> {
        PrettyBer {
            obj: self,
            indent,
            inc: increment,

            flags: Vec::new(),
        }
    }
}

impl<'a> PrettyBer<'a> {
    pub fn set_flag(&mut self, flag: PrettyPrinterFlag) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    pub fn next_indent<'b>(&self, obj: &'b BerObject) -> PrettyBer<'b> {
        PrettyBer {
            obj,
            indent: self.indent + self.inc,
            inc: self.inc,
            flags: self.flags.to_vec(),
        }
    }

    fn write_children(&self, f: &mut fmt::Formatter, children: &[BerObject]) -> fmt::Result {
        for o in children {
            write!(f, "{:?}", self.next_indent(o))?;
        }
        if self.indent > 0 {
            write!(f, "{:1$}", " ", self.indent)?;
        }
        Ok(())
    }
}

fn universal_type_name(tag: Tag) -> Option<&'static str> {
    let name = match tag {
        Tag::EndOfContent => "EndOfContent",
        Tag::Boolean => "Boolean",
        Tag::Integer => "Integer",
        Tag::BitString => "BitString",
        Tag::OctetString => "OctetString",
        Tag::Null => "Null",
        Tag::Oid => "OID",
        Tag::ObjDescriptor => "ObjectDescriptor",
        Tag::External => "External",
        Tag::RealType => "Real",
        Tag::Enumerated => "Enumerated",
        Tag::EmbeddedPdv => "EmbeddedPdv",
        Tag::Utf8String => "UTF8String",
        Tag::RelativeOid => "RelativeOID",
        Tag::Sequence => "Sequence",
        Tag::Set => "Set",
        Tag::NumericString => "NumericString",
        Tag::PrintableString => "PrintableString",
        Tag::T61String => "T61String",
        Tag::VideotexString => "VideotexString",
        Tag::Ia5String => "IA5String",
        Tag::UtcTime => "UTCTime",
        Tag::GeneralizedTime => "GeneralizedTime",
        Tag::GraphicString => "GraphicString",
        Tag::VisibleString => "VisibleString",
        Tag::GeneralString => "GeneralString",
        Tag::UniversalString => "UniversalString",
        Tag::BmpString => "BmpString",
        _ => return None,
    };
    Some(name)
}

impl<'a> fmt::Debug for PrettyBer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let obj = self.obj;
        if self.indent > 0 {
            write!(f, "{:1$}", " ", self.indent)?;
        };
        if self.flags.contains(&PrettyPrinterFlag::ShowOffsets) {
            let r = obj.raw_range();
            write!(f, "@{}+{} ", r.start, r.end - r.start)?;
        }
        if self.flags.contains(&PrettyPrinterFlag::ShowHeader) {
            write!(
                f,
                "[c:{:?}, s:{}, t:{}] ",
                obj.header.class, obj.header.constructed as u8, obj.header.tag.0
            )?;
        };
        let name = match obj.header.class {
            Class::Universal => universal_type_name(obj.header.tag).map(String::from),
            _ => None,
        }
        .unwrap_or_else(|| format!("{} [{}]", obj.header.class, obj.header.tag.0));

        match &obj.content {
            BerObjectContent::Constructed(v) => {
                writeln!(f, "{} {{", name)?;
                self.write_children(f, v)?;
                writeln!(f, "}}")
            }
            BerObjectContent::Encapsulated(_, inner) => {
                writeln!(f, "{} (encapsulates) {{", name)?;
                self.write_children(f, std::slice::from_ref(inner.as_ref()))?;
                writeln!(f, "}}")
            }
            BerObjectContent::BmpString(_, s) => writeln!(f, "{}({:?})", name, s),
            BerObjectContent::Primitive(s) if obj.header.is_universal() => match obj.header.tag {
                Tag::Null => writeln!(f, "{}", name),
                Tag::Boolean => match obj.as_bool() {
                    Ok(b) => writeln!(f, "{}({})", name, b),
                    Err(e) => writeln!(f, "{}({:?}) <{}>", name, HexSlice(s), e),
                },
                Tag::Oid | Tag::RelativeOid => match obj.as_oid() {
                    Ok(oid) => {
                        let id = oid.to_id_string();
                        match oid_name(&id) {
                            Some(n) => writeln!(f, "{}({} {})", name, id, n),
                            None => writeln!(f, "{}({})", name, id),
                        }
                    }
                    Err(e) => writeln!(f, "{}({:?}) <{}>", name, HexSlice(s), e),
                },
                Tag::BitString => match obj.as_bitstring() {
                    Ok(b) => writeln!(f, "{}({},{:?})", name, b.unused_bits, HexSlice(b.data)),
                    Err(e) => writeln!(f, "{}({:?}) <{}>", name, HexSlice(s), e),
                },
                _ => match obj.as_str() {
                    Ok(st) => writeln!(f, "{}({:?})", name, st),
                    Err(_) => writeln!(f, "{}({:?})", name, HexSlice(s)),
                },
            },
            BerObjectContent::Primitive(s) => writeln!(f, "{}({:?})", name, HexSlice(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PrettyPrinterFlag;
    use crate::ber::*;
    use crate::oid::Oid;

    #[test]
    fn test_pretty_print() {
        let d = BerObject::from_seq(vec![
            BerObject::from_int_slice(b"\x01\x00\x01"),
            BerObject::from_oid(Oid::from(&[1, 2, 840, 113549, 1, 1, 1]).unwrap()),
            BerObject::from_set(vec![BerObject::from_int_slice(b"\x01"), BerObject::null()]),
        ]);

        let s = format!("{:?}", d.as_pretty(0, 2));
        assert_eq!(
            s,
            "Sequence {\n  Integer([01 00 01])\n  OID(1.2.840.113549.1.1.1 rsaEncryption)\n  Set {\n    Integer([01])\n    Null\n  }\n}\n"
        );

        let mut pp = d.as_pretty(0, 4);
        pp.set_flag(PrettyPrinterFlag::ShowHeader);
        let s = format!("{:?}", pp);
        assert!(s.starts_with("[c:Universal, s:1, t:16] Sequence {"));
    }
}
