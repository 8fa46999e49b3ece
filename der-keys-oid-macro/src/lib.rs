use proc_macro::TokenStream;

/// Encode one arc in base 128, most significant group first, with the
/// continuation bit set on every octet but the last.
fn encode_arc(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        groups.push(0x80 | (value & 0x7f) as u8);
        value >>= 7;
    }
    groups.reverse();
    out.extend_from_slice(&groups);
}

fn encode_components(components: &[u64], relative: bool) -> Result<Vec<u8>, String> {
    let mut enc = Vec::new();
    let mut dec = components;
    if !relative {
        if dec.len() < 2 {
            return Err("need at least two components for non-relative oid".to_string());
        }
        if dec[0] > 2 || (dec[0] < 2 && dec[1] >= 40) {
            return Err("first components are too big".to_string());
        }
        let first = dec[0]
            .checked_mul(40)
            .and_then(|v| v.checked_add(dec[1]))
            .ok_or_else(|| "first components are too big".to_string())?;
        encode_arc(first, &mut enc);
        dec = &dec[2..];
    }
    for arc in dec {
        encode_arc(*arc, &mut enc);
    }
    Ok(enc)
}

/// Expand a dotted OID literal (`1.2.840.113549`) to its DER content octets,
/// as an array expression. Prefix with `rel` for a relative OID.
#[proc_macro]
pub fn encode_oid(input: TokenStream) -> TokenStream {
    let s = input.to_string();

    let (rem, relative) = if let Some(stripped) = s.strip_prefix("rel ") {
        (stripped, true)
    } else {
        (s.as_ref(), false)
    };

    let arcs: Result<Vec<u64>, _> = rem
        .split('.')
        .map(|segment| segment.trim())
        .map(|s| s.parse::<u64>())
        .collect();

    let enc = match arcs {
        Ok(arcs) => encode_components(&arcs, relative),
        Err(e) => Err(format!("invalid oid arc: {}", e)),
    };

    let out = match enc {
        Ok(enc) => {
            let mut s = String::with_capacity(2 + 6 * enc.len());
            s.push('[');
            for byte in enc.iter() {
                s.push_str(&format!("0x{:02x}u8, ", byte));
            }
            s.push(']');
            s
        }
        Err(msg) => format!("compile_error!({:?})", msg),
    };
    out.parse().unwrap()
}
