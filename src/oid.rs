//! Object ID (OID) representations, codec and name registry
//!
//! An object identifier is a sequence of non-negative integers (arcs), written
//! as a dotted string (`1.2.840.113549.1.1.1`). In DER, the first two arcs are
//! merged into one value `40 * a + b`, and every value is written in base 128,
//! most significant group first, with the high bit set on all octets but the
//! last one of each value.
//!
//! Constant OIDs can be built at compile time with the [`oid!`](crate::oid!)
//! macro:
//!
//! ```rust
//! use der_keys::{oid, oid::Oid};
//!
//! const RSA: Oid<'static> = oid!(1.2.840.113549.1.1.1);
//! assert_eq!(RSA.as_bytes(), &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]);
//! assert_eq!(RSA.to_id_string(), "1.2.840.113549.1.1.1");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when a dotted string or an OID encoding is not valid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OidParseError {
    #[error("empty object identifier")]
    Empty,
    #[error("object identifier needs at least two arcs")]
    TooShort,
    /// First arc above 2, or second arc above 39 under arcs 0 and 1
    #[error("first arcs out of range")]
    FirstComponentsTooLarge,
    #[error("arc is not a decimal number")]
    InvalidArc,
    #[error("arc does not fit in 64 bits")]
    ArcTooLarge,
    /// The last octet has its continuation bit set
    #[error("truncated sub-identifier")]
    Truncated,
}

/// Append `value` in base 128, most significant group first
pub(crate) fn encode_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut n = 0;
    loop {
        groups[n] = (value & 0x7f) as u8;
        n += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let cont = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | cont);
    }
}

fn encode_arcs(arcs: &[u64], relative: bool) -> Result<Vec<u8>, OidParseError> {
    let mut out = Vec::new();
    let mut rest = arcs;
    if !relative {
        match arcs {
            [] => return Err(OidParseError::Empty),
            [_] => return Err(OidParseError::TooShort),
            [a, b, ..] => {
                if *a > 2 || (*a < 2 && *b >= 40) {
                    return Err(OidParseError::FirstComponentsTooLarge);
                }
                let first = (a * 40)
                    .checked_add(*b)
                    .ok_or(OidParseError::ArcTooLarge)?;
                encode_base128(first, &mut out);
                rest = &arcs[2..];
            }
        }
    }
    for arc in rest {
        encode_base128(*arc, &mut out);
    }
    Ok(out)
}

fn parse_dotted(s: &str) -> Result<Vec<u64>, OidParseError> {
    if s.trim().is_empty() {
        return Err(OidParseError::Empty);
    }
    s.split('.')
        .map(|arc| {
            let arc = arc.trim();
            if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                return Err(OidParseError::InvalidArc);
            }
            arc.parse::<u64>().or(Err(OidParseError::ArcTooLarge))
        })
        .collect()
}

/// Encode a dotted OID string to its DER content octets
///
/// ```rust
/// use der_keys::oid::oid_to_der;
///
/// assert_eq!(oid_to_der("1.2.840.113549").unwrap(), vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d]);
/// ```
pub fn oid_to_der(s: &str) -> Result<Vec<u8>, OidParseError> {
    encode_arcs(&parse_dotted(s)?, false)
}

/// Decode DER content octets to a dotted OID string
pub fn der_to_oid(bytes: &[u8]) -> Result<String, OidParseError> {
    Oid::new(Cow::Borrowed(bytes)).try_to_id_string()
}

/// Object ID (OID) representation, holding the DER content octets
#[derive(Hash, PartialEq, Eq, Clone)]
pub struct Oid<'a> {
    pub(crate) asn1: Cow<'a, [u8]>,
    /// True for a RELATIVE-OID (no merged first arcs)
    pub relative: bool,
}

impl<'a> Oid<'a> {
    /// Create an OID from the DER content octets. The encoding is not checked.
    pub const fn new(asn1: Cow<'a, [u8]>) -> Oid<'a> {
        Oid {
            asn1,
            relative: false,
        }
    }

    /// Create a relative OID from the DER content octets
    pub const fn new_relative(asn1: Cow<'a, [u8]>) -> Oid<'a> {
        Oid {
            asn1,
            relative: true,
        }
    }

    /// Build an OID from an array of arcs
    pub fn from(s: &[u64]) -> Result<Oid<'static>, OidParseError> {
        let asn1 = encode_arcs(s, false)?;
        Ok(Oid::new(Cow::Owned(asn1)))
    }

    /// Build a relative OID from an array of arcs
    pub fn from_relative(s: &[u64]) -> Result<Oid<'static>, OidParseError> {
        let asn1 = encode_arcs(s, true)?;
        Ok(Oid::new_relative(Cow::Owned(asn1)))
    }

    /// DER content octets
    pub fn as_bytes(&self) -> &[u8] {
        self.asn1.as_ref()
    }

    pub fn into_owned(self) -> Oid<'static> {
        Oid {
            asn1: Cow::Owned(self.asn1.into_owned()),
            relative: self.relative,
        }
    }

    /// Iterate over the arcs
    ///
    /// Returns `None` if an arc does not fit in a `u64`. The iterator stops
    /// early on a truncated encoding.
    pub fn iter(&self) -> Option<SubIdentifierIterator<'_>> {
        let bytes = self.as_bytes();
        let mut acc: u64 = 0;
        for &b in bytes {
            if acc > (u64::MAX >> 7) {
                return None;
            }
            acc = if b & 0x80 != 0 { (acc << 7) | u64::from(b & 0x7f) } else { 0 };
        }
        Some(SubIdentifierIterator {
            oid: self,
            pos: 0,
            pending: None,
        })
    }

    /// Dotted representation, checking the encoding
    pub fn try_to_id_string(&self) -> Result<String, OidParseError> {
        let bytes = self.as_bytes();
        if bytes.is_empty() && !self.relative {
            return Err(OidParseError::Empty);
        }
        if bytes.last().map_or(false, |b| b & 0x80 != 0) {
            return Err(OidParseError::Truncated);
        }
        let it = self.iter().ok_or(OidParseError::ArcTooLarge)?;
        let arcs: Vec<String> = it.map(|arc| arc.to_string()).collect();
        Ok(arcs.join("."))
    }

    /// Dotted representation. Invalid encodings are shown as hex.
    pub fn to_id_string(&self) -> String {
        match self.try_to_id_string() {
            Ok(s) => s,
            Err(_) => {
                let hex: Vec<String> = self.as_bytes().iter().map(|b| format!("{:02x}", b)).collect();
                hex.join("")
            }
        }
    }

    /// Registered name of this OID, if any
    pub fn name(&self) -> Option<&'static str> {
        self.try_to_id_string().ok().and_then(|s| oid_name(&s))
    }
}

/// Iterator over the arcs of an OID
#[derive(Debug)]
pub struct SubIdentifierIterator<'a> {
    oid: &'a Oid<'a>,
    pos: usize,
    pending: Option<u64>,
}

impl<'a> Iterator for SubIdentifierIterator<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(arc) = self.pending.take() {
            return Some(arc);
        }
        if self.pos == self.oid.asn1.len() {
            return None;
        }
        let split_first = self.pos == 0 && !self.oid.relative;
        let mut res = 0u64;
        for o in self.oid.asn1[self.pos..].iter() {
            self.pos += 1;
            res = (res << 7) + u64::from(o & 0x7f);
            if o & 0x80 == 0 {
                break;
            }
        }
        if split_first {
            let (a, b) = match res {
                0..=39 => (0, res),
                40..=79 => (1, res - 40),
                _ => (2, res - 80),
            };
            self.pending = Some(b);
            return Some(a);
        }
        Some(res)
    }
}

impl<'a> fmt::Display for Oid<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.relative {
            f.write_str("rel. ")?;
        }
        f.write_str(&self.to_id_string())
    }
}

impl<'a> fmt::Debug for Oid<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("OID(")?;
        <Oid as fmt::Display>::fmt(self, f)?;
        f.write_str(")")
    }
}

impl<'a> FromStr for Oid<'a> {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Oid::new(Cow::Owned(oid_to_der(s)?)))
    }
}

/// Known object identifiers: dotted form, name, and whether the name is
/// deprecated (deprecated names are not resolved back to an identifier)
static OID_REGISTRY: &[(&str, &str, bool)] = &[
    ("1.2.840.113549.1.1.1", "rsaEncryption", false),
    ("1.2.840.113549.1.1.4", "md5WithRSAEncryption", false),
    ("1.2.840.113549.1.1.5", "sha1WithRSAEncryption", false),
    ("1.2.840.113549.1.1.7", "RSAES-OAEP", false),
    ("1.2.840.113549.1.1.8", "mgf1", false),
    ("1.2.840.113549.1.1.9", "pSpecified", false),
    ("1.2.840.113549.1.1.10", "RSASSA-PSS", false),
    ("1.2.840.113549.1.1.11", "sha256WithRSAEncryption", false),
    ("1.2.840.113549.1.1.12", "sha384WithRSAEncryption", false),
    ("1.2.840.113549.1.1.13", "sha512WithRSAEncryption", false),
    ("1.3.101.112", "EdDSA25519", false),
    ("1.2.840.10040.4.3", "dsa-with-sha1", false),
    ("1.3.14.3.2.7", "desCBC", false),
    ("1.3.14.3.2.26", "sha1", false),
    ("1.3.14.3.2.29", "sha1WithRSASignature", false),
    ("2.16.840.1.101.3.4.2.1", "sha256", false),
    ("2.16.840.1.101.3.4.2.2", "sha384", false),
    ("2.16.840.1.101.3.4.2.3", "sha512", false),
    ("2.16.840.1.101.3.4.2.4", "sha224", false),
    ("2.16.840.1.101.3.4.2.5", "sha512-224", false),
    ("2.16.840.1.101.3.4.2.6", "sha512-256", false),
    ("1.2.840.113549.2.2", "md2", false),
    ("1.2.840.113549.2.5", "md5", false),
    ("1.2.840.113549.1.7.1", "data", false),
    ("1.2.840.113549.1.7.2", "signedData", false),
    ("1.2.840.113549.1.7.3", "envelopedData", false),
    ("1.2.840.113549.1.7.4", "signedAndEnvelopedData", false),
    ("1.2.840.113549.1.7.5", "digestedData", false),
    ("1.2.840.113549.1.7.6", "encryptedData", false),
    ("1.2.840.113549.1.9.1", "emailAddress", false),
    ("1.2.840.113549.1.9.2", "unstructuredName", false),
    ("1.2.840.113549.1.9.3", "contentType", false),
    ("1.2.840.113549.1.9.4", "messageDigest", false),
    ("1.2.840.113549.1.9.5", "signingTime", false),
    ("1.2.840.113549.1.9.6", "counterSignature", false),
    ("1.2.840.113549.1.9.7", "challengePassword", false),
    ("1.2.840.113549.1.9.8", "unstructuredAddress", false),
    ("1.2.840.113549.1.9.14", "extensionRequest", false),
    ("1.2.840.113549.1.9.20", "friendlyName", false),
    ("1.2.840.113549.1.9.21", "localKeyId", false),
    ("1.2.840.113549.1.9.22.1", "x509Certificate", false),
    ("1.2.840.113549.1.12.10.1.1", "keyBag", false),
    ("1.2.840.113549.1.12.10.1.2", "pkcs8ShroudedKeyBag", false),
    ("1.2.840.113549.1.12.10.1.3", "certBag", false),
    ("1.2.840.113549.1.12.10.1.4", "crlBag", false),
    ("1.2.840.113549.1.12.10.1.5", "secretBag", false),
    ("1.2.840.113549.1.12.10.1.6", "safeContentsBag", false),
    ("1.2.840.113549.1.5.13", "pkcs5PBES2", false),
    ("1.2.840.113549.1.5.12", "pkcs5PBKDF2", false),
    ("1.2.840.113549.1.12.1.1", "pbeWithSHAAnd128BitRC4", false),
    ("1.2.840.113549.1.12.1.2", "pbeWithSHAAnd40BitRC4", false),
    ("1.2.840.113549.1.12.1.3", "pbeWithSHAAnd3-KeyTripleDES-CBC", false),
    ("1.2.840.113549.1.12.1.4", "pbeWithSHAAnd2-KeyTripleDES-CBC", false),
    ("1.2.840.113549.1.12.1.5", "pbeWithSHAAnd128BitRC2-CBC", false),
    ("1.2.840.113549.1.12.1.6", "pbewithSHAAnd40BitRC2-CBC", false),
    ("1.2.840.113549.2.7", "hmacWithSHA1", false),
    ("1.2.840.113549.2.8", "hmacWithSHA224", false),
    ("1.2.840.113549.2.9", "hmacWithSHA256", false),
    ("1.2.840.113549.2.10", "hmacWithSHA384", false),
    ("1.2.840.113549.2.11", "hmacWithSHA512", false),
    ("1.2.840.113549.3.7", "des-EDE3-CBC", false),
    ("2.16.840.1.101.3.4.1.2", "aes128-CBC", false),
    ("2.16.840.1.101.3.4.1.22", "aes192-CBC", false),
    ("2.16.840.1.101.3.4.1.42", "aes256-CBC", false),
    ("2.5.4.3", "commonName", false),
    ("2.5.4.4", "surname", false),
    ("2.5.4.5", "serialNumber", false),
    ("2.5.4.6", "countryName", false),
    ("2.5.4.7", "localityName", false),
    ("2.5.4.8", "stateOrProvinceName", false),
    ("2.5.4.9", "streetAddress", false),
    ("2.5.4.10", "organizationName", false),
    ("2.5.4.11", "organizationalUnitName", false),
    ("2.5.4.12", "title", false),
    ("2.5.4.13", "description", false),
    ("2.5.4.15", "businessCategory", false),
    ("2.5.4.17", "postalCode", false),
    ("2.5.4.42", "givenName", false),
    ("1.3.6.1.4.1.311.60.2.1.2", "jurisdictionOfIncorporationStateOrProvinceName", false),
    ("1.3.6.1.4.1.311.60.2.1.3", "jurisdictionOfIncorporationCountryName", false),
    ("2.16.840.1.113730.1.1", "nsCertType", false),
    ("2.16.840.1.113730.1.13", "nsComment", false),
    ("2.5.29.1", "authorityKeyIdentifier", true),
    ("2.5.29.2", "keyAttributes", true),
    ("2.5.29.3", "certificatePolicies", true),
    ("2.5.29.4", "keyUsageRestriction", true),
    ("2.5.29.5", "policyMapping", true),
    ("2.5.29.6", "subtreesConstraint", true),
    ("2.5.29.7", "subjectAltName", true),
    ("2.5.29.8", "issuerAltName", true),
    ("2.5.29.9", "subjectDirectoryAttributes", true),
    ("2.5.29.10", "basicConstraints", true),
    ("2.5.29.11", "nameConstraints", true),
    ("2.5.29.12", "policyConstraints", true),
    ("2.5.29.13", "basicConstraints", true),
    ("2.5.29.14", "subjectKeyIdentifier", false),
    ("2.5.29.15", "keyUsage", false),
    ("2.5.29.16", "privateKeyUsagePeriod", true),
    ("2.5.29.17", "subjectAltName", false),
    ("2.5.29.18", "issuerAltName", false),
    ("2.5.29.19", "basicConstraints", false),
    ("2.5.29.20", "cRLNumber", true),
    ("2.5.29.21", "cRLReason", true),
    ("2.5.29.22", "expirationDate", true),
    ("2.5.29.23", "instructionCode", true),
    ("2.5.29.24", "invalidityDate", true),
    ("2.5.29.25", "cRLDistributionPoints", true),
    ("2.5.29.26", "issuingDistributionPoint", true),
    ("2.5.29.27", "deltaCRLIndicator", true),
    ("2.5.29.28", "issuingDistributionPoint", true),
    ("2.5.29.29", "certificateIssuer", true),
    ("2.5.29.30", "nameConstraints", true),
    ("2.5.29.31", "cRLDistributionPoints", false),
    ("2.5.29.32", "certificatePolicies", false),
    ("2.5.29.33", "policyMappings", true),
    ("2.5.29.34", "policyConstraints", true),
    ("2.5.29.35", "authorityKeyIdentifier", false),
    ("2.5.29.36", "policyConstraints", true),
    ("2.5.29.37", "extKeyUsage", false),
    ("2.5.29.46", "freshestCRL", true),
    ("2.5.29.54", "inhibitAnyPolicy", true),
    ("1.3.6.1.4.1.11129.2.4.2", "timestampList", false),
    ("1.3.6.1.5.5.7.1.1", "authorityInfoAccess", false),
    ("1.3.6.1.5.5.7.3.1", "serverAuth", false),
    ("1.3.6.1.5.5.7.3.2", "clientAuth", false),
    ("1.3.6.1.5.5.7.3.3", "codeSigning", false),
    ("1.3.6.1.5.5.7.3.4", "emailProtection", false),
    ("1.3.6.1.5.5.7.3.8", "timeStamping", false),
];

/// Name registered for a dotted OID
pub fn oid_name(id: &str) -> Option<&'static str> {
    OID_REGISTRY
        .iter()
        .find(|(i, _, _)| *i == id)
        .map(|(_, name, _)| *name)
}

/// Dotted OID registered under `name`
pub fn oid_from_name(name: &str) -> Option<&'static str> {
    OID_REGISTRY
        .iter()
        .find(|(_, n, deprecated)| *n == name && !deprecated)
        .map(|(id, _, _)| *id)
}

/// rsaEncryption (PKCS#1)
pub const OID_PKCS1_RSAENCRYPTION: Oid<'static> = oid!(1.2.840.113549.1.1.1);
pub const OID_PKCS1_SHA256WITHRSA: Oid<'static> = oid!(1.2.840.113549.1.1.11);
pub const OID_HASH_SHA1: Oid<'static> = oid!(1.3.14.3.2.26);
pub const OID_HASH_SHA256: Oid<'static> = oid!(2.16.840.1.101.3.4.2.1);
pub const OID_HASH_SHA384: Oid<'static> = oid!(2.16.840.1.101.3.4.2.2);
pub const OID_HASH_SHA512: Oid<'static> = oid!(2.16.840.1.101.3.4.2.3);

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_oid_fmt() {
        let oid = Oid::from(&[1, 2, 840, 113549, 1, 1, 5]).unwrap();
        assert_eq!(format!("{}", oid), "1.2.840.113549.1.1.5".to_owned());
        assert_eq!(format!("{:?}", oid), "OID(1.2.840.113549.1.1.5)".to_owned());
        let oid = Oid::from_relative(&[840, 113549]).unwrap();
        assert_eq!(format!("{}", oid), "rel. 840.113549".to_owned());
    }

    #[test_case("1.2.840.113549", &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d] ; "rsadsi")]
    #[test_case("2.5.4.3", &[0x55, 0x04, 0x03] ; "common name")]
    #[test_case("0.9.2342.19200300.100.1.25", &[0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x19] ; "domain component")]
    #[test_case("2.999.3", &[0x88, 0x37, 0x03] ; "large second arc")]
    fn test_oid_codec(s: &str, der: &[u8]) {
        assert_eq!(oid_to_der(s).unwrap(), der);
        assert_eq!(der_to_oid(der).unwrap(), s);
    }

    #[test_case("" => OidParseError::Empty ; "empty")]
    #[test_case("1" => OidParseError::TooShort ; "single arc")]
    #[test_case("3.1" => OidParseError::FirstComponentsTooLarge ; "first arc")]
    #[test_case("1.40" => OidParseError::FirstComponentsTooLarge ; "second arc")]
    #[test_case("1.2.x" => OidParseError::InvalidArc ; "not a number")]
    #[test_case("1..2" => OidParseError::InvalidArc ; "empty arc")]
    #[test_case("1.2.99999999999999999999" => OidParseError::ArcTooLarge ; "overflow")]
    fn test_oid_to_der_errors(s: &str) -> OidParseError {
        oid_to_der(s).unwrap_err()
    }

    #[test]
    fn test_der_to_oid_errors() {
        assert_eq!(der_to_oid(&[]), Err(OidParseError::Empty));
        assert_eq!(der_to_oid(&[0x2a, 0x86]), Err(OidParseError::Truncated));
        assert_eq!(
            der_to_oid(&[0x2a, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
            Err(OidParseError::ArcTooLarge)
        );
    }

    #[test]
    fn test_oid_names() {
        assert_eq!(oid_name("1.2.840.113549.1.1.1"), Some("rsaEncryption"));
        assert_eq!(oid_from_name("rsaEncryption"), Some("1.2.840.113549.1.1.1"));
        assert_eq!(OID_HASH_SHA256.name(), Some("sha256"));
        assert_eq!(oid_name("1.2.3.4"), None);
    }

    #[test]
    fn test_oid_macro() {
        assert_eq!(OID_PKCS1_RSAENCRYPTION.as_bytes(), &oid_to_der("1.2.840.113549.1.1.1").unwrap()[..]);
        let rel = oid!(rel 840.113549);
        assert!(rel.relative);
        assert_eq!(rel.as_bytes(), &[0x86, 0x48, 0x86, 0xf7, 0x0d]);
        assert_eq!("2.5.4.3".parse::<Oid>().unwrap(), oid!(2.5.4.3));
    }
}
