use super::{Captured, Captures, Schema};
use crate::ber::BerObject;
use crate::error::ValidationError;
use log::warn;

/// Match `obj` against `schema`, storing captured values
///
/// Returns `Ok(false)` on mismatch, with one message per violated
/// expectation appended to `errors`. Captures of partial matches of optional
/// children are discarded. An error is returned only if a matched value
/// cannot be captured in the requested form.
pub fn validate<'o>(
    obj: &'o BerObject<'o>,
    schema: &Schema,
    captures: &mut Captures<'o>,
    errors: &mut Vec<String>,
) -> Result<bool, ValidationError> {
    let header = &obj.header;
    if let Some(class) = schema.class.filter(|&c| c != header.class) {
        errors.push(format!(
            "[{}] Expected tag class \"{}\", got \"{}\"",
            schema.name, class, header.class
        ));
        return Ok(false);
    }
    if let Some(tag) = schema.tag.filter(|&t| t != header.tag) {
        errors.push(format!(
            "[{}] Expected type \"{:?}\", got \"{:?}\"",
            schema.name, tag, header.tag
        ));
        return Ok(false);
    }
    if let Some(constructed) = schema.constructed.filter(|&c| c != header.constructed) {
        errors.push(format!(
            "[{}] Expected constructed \"{}\", got \"{}\"",
            schema.name, constructed, header.constructed
        ));
        return Ok(false);
    }

    if let Some(children) = schema.children {
        let nodes = obj.children();
        let mut j = 0;
        for child in children {
            let mut matched = false;
            if let Some(node) = nodes.get(j) {
                let mut scratch_captures = captures.clone();
                let mut scratch_errors = Vec::new();
                if validate(node, child, &mut scratch_captures, &mut scratch_errors)? {
                    *captures = scratch_captures;
                    j += 1;
                    matched = true;
                } else if !child.optional {
                    errors.append(&mut scratch_errors);
                }
            }
            if !matched && !child.optional {
                errors.push(format!(
                    "[{}] Tag class \"{}\", type \"{:?}\" expected value length \"{}\", got \"{}\"",
                    schema.name,
                    header.class,
                    header.tag,
                    children.len(),
                    nodes.len()
                ));
                return Ok(false);
            }
        }
    }

    store_captures(obj, schema, captures)?;
    Ok(true)
}

fn store_captures<'o>(
    obj: &'o BerObject<'o>,
    schema: &Schema,
    captures: &mut Captures<'o>,
) -> Result<(), ValidationError> {
    if let Some(key) = schema.capture {
        let value = match obj.as_slice() {
            Ok(s) => Captured::Bytes(s),
            Err(_) => Captured::Object(obj),
        };
        captures.insert(key, value);
    }
    if let Some(key) = schema.capture_asn1 {
        captures.insert(key, Captured::Object(obj));
    }
    if schema.capture_bitstring_contents.is_none() && schema.capture_bitstring_value.is_none() {
        return Ok(());
    }
    let contents: &'o [u8] = match &obj.bit_string_contents {
        Some(s) => &**s,
        None => obj.as_slice().map_err(|e| {
            ValidationError::Unsupported(format!("[{}] no BIT STRING content: {}", schema.name, e))
        })?,
    };
    if let Some(key) = schema.capture_bitstring_contents {
        captures.insert(key, Captured::Bytes(contents));
    }
    if let Some(key) = schema.capture_bitstring_value {
        let value = match contents {
            [] => contents,
            [0, value @ ..] => value,
            [unused, ..] => {
                return Err(ValidationError::Unsupported(format!(
                    "[{}] BIT STRING with {} unused bits",
                    schema.name, unused
                )))
            }
        };
        captures.insert(key, Captured::Bytes(value));
    }
    Ok(())
}

impl Schema {
    /// Match `obj` against this schema, and return the captured values
    ///
    /// On mismatch, the error holds every diagnostic message.
    pub fn validate<'o>(&self, obj: &'o BerObject<'o>) -> Result<Captures<'o>, ValidationError> {
        let mut captures = Captures::new();
        let mut errors = Vec::new();
        if validate(obj, self, &mut captures, &mut errors)? {
            Ok(captures)
        } else {
            if errors.is_empty() {
                errors.push(format!("[{}] no match", self.name));
            }
            warn!("{} does not match: {}", self.name, errors.join("; "));
            Err(ValidationError::Mismatch(errors))
        }
    }
}
