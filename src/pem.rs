//! PEM framing (RFC 7468, with RFC 1421 encapsulated headers)
//!
//! A PEM message is a base64 body between `-----BEGIN <label>-----` and
//! `-----END <label>-----` lines. Legacy messages may carry `Name: value`
//! headers before the body; encrypted messages (`Proc-Type: 4,ENCRYPTED`) are
//! rejected.

use base64ct::{Base64, Encoding};
use log::debug;
use thiserror::Error;

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const BOUNDARY_SUFFIX: &str = "-----";
const LINE_WIDTH: usize = 64;

/// Error raised while reading a PEM message
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PemError {
    #[error("no PEM BEGIN line found")]
    MissingBeginBoundary,
    #[error("no END line for PEM label {0:?}")]
    MissingEndBoundary(String),
    #[error("PEM BEGIN label {begin:?} does not match END label {end:?}")]
    LabelMismatch { begin: String, end: String },
    #[error("invalid PEM label {0:?}")]
    InvalidLabel(String),
    #[error("invalid PEM header: {0}")]
    InvalidHeader(String),
    /// The message is encrypted (`Proc-Type: 4,ENCRYPTED`)
    #[error("PEM message is encrypted")]
    Encrypted,
    #[error("invalid base64 body")]
    Base64,
}

/// Line terminator used when writing PEM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEnding {
    LF,
    CRLF,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::LF => "\n",
            LineEnding::CRLF => "\r\n",
        }
    }
}

/// PEM writer settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    pub line_ending: LineEnding,
}

pub const DEFAULT_ENCODING_CONFIG: EncodeConfig = EncodeConfig {
    line_ending: LineEnding::LF,
};

/// A decoded PEM message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pem {
    /// Label of the BEGIN and END lines, such as `RSA PRIVATE KEY`
    pub label: String,
    /// Encapsulated headers, in order
    pub headers: Vec<(String, String)>,
    /// Decoded body
    pub contents: Vec<u8>,
}

impl Pem {
    pub fn new<S: Into<String>>(label: S, contents: Vec<u8>) -> Self {
        Pem {
            label: label.into(),
            headers: Vec::new(),
            contents,
        }
    }
}

fn valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b' ')
}

fn boundary<'s>(line: &'s str, prefix: &str) -> Option<&'s str> {
    line.strip_prefix(prefix)?.strip_suffix(BOUNDARY_SUFFIX)
}

/// Split the encapsulated headers from the base64 body
fn parse_headers(lines: &[&str]) -> Result<(Vec<(String, String)>, usize), PemError> {
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        if line.trim().is_empty() {
            // blank line closes the header block
            if !headers.is_empty() {
                idx += 1;
            }
            break;
        }
        if line.starts_with(|c: char| c == ' ' || c == '\t') && !headers.is_empty() {
            if let Some(last) = headers.last_mut() {
                last.1.push_str(line.trim());
            }
            idx += 1;
            continue;
        }
        match line.split_once(':') {
            Some((name, value)) => {
                headers.push((name.trim().to_string(), value.trim().to_string()));
                idx += 1;
            }
            None => break,
        }
    }
    if let Some((name, value)) = headers.first() {
        if name != "Proc-Type" {
            return Err(PemError::InvalidHeader(format!(
                "the first header must be Proc-Type, got {:?}",
                name
            )));
        }
        let mut fields = value.splitn(2, ',');
        let version = fields.next().unwrap_or("").trim();
        let kind = fields.next().map(str::trim);
        if version != "4" || kind.is_none() {
            return Err(PemError::InvalidHeader(format!("bad Proc-Type {:?}", value)));
        }
        if kind == Some("ENCRYPTED") {
            return Err(PemError::Encrypted);
        }
    }
    Ok((headers, idx))
}

fn parse_message<'s, I>(label: &str, lines: &mut I) -> Result<Pem, PemError>
where
    I: Iterator<Item = &'s str>,
{
    let mut body = Vec::new();
    loop {
        let raw = match lines.next() {
            Some(l) => l.trim_end(),
            None => return Err(PemError::MissingEndBoundary(label.to_string())),
        };
        if let Some(end) = boundary(raw.trim_start(), END_PREFIX) {
            if end != label {
                return Err(PemError::LabelMismatch {
                    begin: label.to_string(),
                    end: end.to_string(),
                });
            }
            break;
        }
        body.push(raw);
    }
    let (headers, start) = parse_headers(&body)?;
    let b64: String = body[start..]
        .iter()
        .flat_map(|l| l.chars())
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let contents = Base64::decode_vec(&b64).or(Err(PemError::Base64))?;
    Ok(Pem {
        label: label.to_string(),
        headers,
        contents,
    })
}

/// Decode every PEM message in `input`
///
/// Text outside of the BEGIN and END lines is ignored.
pub fn decode_all(input: &str) -> Result<Vec<Pem>, PemError> {
    let mut lines = input.lines();
    let mut v = Vec::new();
    while let Some(line) = lines.next() {
        let label = match boundary(line.trim(), BEGIN_PREFIX) {
            Some(label) => label,
            None => continue,
        };
        if !valid_label(label) {
            return Err(PemError::InvalidLabel(label.to_string()));
        }
        v.push(parse_message(label, &mut lines)?);
    }
    if v.is_empty() {
        return Err(PemError::MissingBeginBoundary);
    }
    debug!("decoded {} PEM message(s)", v.len());
    Ok(v)
}

/// Decode the first PEM message in `input`
pub fn decode(input: &str) -> Result<Pem, PemError> {
    let mut v = decode_all(input)?;
    Ok(v.remove(0))
}

/// Encode a message with the default settings (LF line endings)
pub fn encode(pem: &Pem) -> String {
    encode_config(pem, DEFAULT_ENCODING_CONFIG)
}

/// Encode a message, wrapping the body at 64 columns
pub fn encode_config(pem: &Pem, config: EncodeConfig) -> String {
    let eol = config.line_ending.as_str();
    let b64 = Base64::encode_string(&pem.contents);
    let mut out = String::with_capacity(b64.len() + 2 * pem.label.len() + 64);
    out.push_str(BEGIN_PREFIX);
    out.push_str(&pem.label);
    out.push_str(BOUNDARY_SUFFIX);
    out.push_str(eol);
    for (name, value) in &pem.headers {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(eol);
    }
    if !pem.headers.is_empty() {
        out.push_str(eol);
    }
    // base64 output is ASCII, so byte chunks are char boundaries
    for chunk in b64.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push_str(eol);
    }
    out.push_str(END_PREFIX);
    out.push_str(&pem.label);
    out.push_str(BOUNDARY_SUFFIX);
    out.push_str(eol);
    out
}
