use super::{RsaPrivateKey, RsaPublicKey, PKCS1_PRIVATE_LABEL, PKCS1_PUBLIC_LABEL, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL};
use crate::ber::integer::{decode_array_uint8, decode_biguint};
use crate::ber::BerObject;
use crate::der::parse_der;
use crate::error::{KeyError, ValidationError};
use crate::oid::{Oid, OID_PKCS1_RSAENCRYPTION};
use crate::pem;
use crate::validator::{
    CaptureKey, Captures, PRIVATE_KEY_INFO, RSA_PRIVATE_KEY, RSA_PUBLIC_KEY, SUBJECT_PUBLIC_KEY_INFO,
};
use log::debug;
use num_bigint::BigUint;
use std::borrow::Cow;

fn captured_bytes<'o>(captures: &Captures<'o>, key: CaptureKey) -> Result<&'o [u8], KeyError> {
    captures
        .bytes(key)
        .ok_or_else(|| ValidationError::Mismatch(vec![format!("no value captured for {:?}", key)]).into())
}

fn captured_uint(captures: &Captures, key: CaptureKey) -> Result<BigUint, KeyError> {
    Ok(decode_biguint(captured_bytes(captures, key)?)?)
}

fn check_version(captures: &Captures, key: CaptureKey) -> Result<(), KeyError> {
    let version = decode_array_uint8(captured_bytes(captures, key)?)?;
    if version != 0 {
        return Err(KeyError::UnsupportedVersion(version));
    }
    Ok(())
}

fn check_algorithm(captures: &Captures, key: CaptureKey) -> Result<(), KeyError> {
    let oid = Oid::new(Cow::Borrowed(captured_bytes(captures, key)?));
    if oid != OID_PKCS1_RSAENCRYPTION {
        return Err(KeyError::UnknownAlgorithm(oid.to_id_string()));
    }
    Ok(())
}

fn pem_body(input: &str, labels: &[&str]) -> Result<(String, Vec<u8>), KeyError> {
    let p = pem::decode(input)?;
    if !labels.contains(&p.label.as_str()) {
        return Err(KeyError::UnexpectedLabel(p.label));
    }
    Ok((p.label, p.contents))
}

impl RsaPublicKey {
    fn from_rsa_public_key(obj: &BerObject) -> Result<Self, KeyError> {
        let captures = RSA_PUBLIC_KEY.validate(obj)?;
        let n = captured_uint(&captures, CaptureKey::PublicKeyModulus)?;
        let e = captured_uint(&captures, CaptureKey::PublicKeyExponent)?;
        debug!("loaded RSA public key ({} bits)", n.bits());
        Ok(RsaPublicKey::new(n, e))
    }

    fn from_subject_public_key_info(obj: &BerObject) -> Result<Self, KeyError> {
        let captures = SUBJECT_PUBLIC_KEY_INFO.validate(obj)?;
        check_algorithm(&captures, CaptureKey::PublicKeyOid)?;
        match captures.object(CaptureKey::RsaPublicKey) {
            Some(inner) => RsaPublicKey::from_rsa_public_key(inner),
            None => {
                let value = captured_bytes(&captures, CaptureKey::SubjectPublicKey)?;
                RsaPublicKey::from_pkcs1_der(value)
            }
        }
    }

    /// Read a PKCS#1 `RSAPublicKey`
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, KeyError> {
        let (_, obj) = parse_der(der)?;
        RsaPublicKey::from_rsa_public_key(&obj)
    }

    /// Read a `SubjectPublicKeyInfo`
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, KeyError> {
        let (_, obj) = parse_der(der)?;
        RsaPublicKey::from_subject_public_key_info(&obj)
    }

    /// Read either a `SubjectPublicKeyInfo` or a PKCS#1 `RSAPublicKey`
    ///
    /// Only schema mismatches of the `SubjectPublicKeyInfo` attempt fall back
    /// to PKCS#1.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        let (_, obj) = parse_der(der)?;
        match RsaPublicKey::from_subject_public_key_info(&obj) {
            Err(KeyError::Schema(e)) => {
                debug!("not a SubjectPublicKeyInfo ({}), trying RSAPublicKey", e);
                RsaPublicKey::from_rsa_public_key(&obj)
            }
            r => r,
        }
    }

    /// Read a PEM `RSA PUBLIC KEY`
    pub fn from_pkcs1_pem(input: &str) -> Result<Self, KeyError> {
        let (_, der) = pem_body(input, &[PKCS1_PUBLIC_LABEL])?;
        RsaPublicKey::from_pkcs1_der(&der)
    }

    /// Read a PEM `PUBLIC KEY`
    pub fn from_public_key_pem(input: &str) -> Result<Self, KeyError> {
        let (_, der) = pem_body(input, &[PUBLIC_KEY_LABEL])?;
        RsaPublicKey::from_public_key_der(&der)
    }

    /// Read a PEM public key, choosing the structure from the label
    pub fn from_pem(input: &str) -> Result<Self, KeyError> {
        let (label, der) = pem_body(input, &[PKCS1_PUBLIC_LABEL, PUBLIC_KEY_LABEL])?;
        if label == PKCS1_PUBLIC_LABEL {
            RsaPublicKey::from_pkcs1_der(&der)
        } else {
            RsaPublicKey::from_public_key_der(&der)
        }
    }
}

impl RsaPrivateKey {
    fn from_rsa_private_key(obj: &BerObject) -> Result<Self, KeyError> {
        let captures = RSA_PRIVATE_KEY.validate(obj)?;
        check_version(&captures, CaptureKey::PrivateKeyVersion)?;
        let field = |key| captured_uint(&captures, key);
        let key = RsaPrivateKey::from_parts(
            field(CaptureKey::PrivateKeyModulus)?,
            field(CaptureKey::PrivateKeyPublicExponent)?,
            field(CaptureKey::PrivateKeyPrivateExponent)?,
            field(CaptureKey::PrivateKeyPrime1)?,
            field(CaptureKey::PrivateKeyPrime2)?,
            field(CaptureKey::PrivateKeyExponent1)?,
            field(CaptureKey::PrivateKeyExponent2)?,
            field(CaptureKey::PrivateKeyCoefficient)?,
        )?;
        debug!("loaded RSA private key");
        Ok(key)
    }

    fn from_private_key_info(obj: &BerObject) -> Result<Self, KeyError> {
        let captures = PRIVATE_KEY_INFO.validate(obj)?;
        check_version(&captures, CaptureKey::PrivateKeyInfoVersion)?;
        check_algorithm(&captures, CaptureKey::PrivateKeyOid)?;
        let inner = captured_bytes(&captures, CaptureKey::PrivateKey)?;
        RsaPrivateKey::from_pkcs1_der(inner)
    }

    /// Read a PKCS#1 `RSAPrivateKey`
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, KeyError> {
        let (_, obj) = parse_der(der)?;
        RsaPrivateKey::from_rsa_private_key(&obj)
    }

    /// Read an unencrypted PKCS#8 `PrivateKeyInfo`
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyError> {
        let (_, obj) = parse_der(der)?;
        RsaPrivateKey::from_private_key_info(&obj)
    }

    /// Read either a PKCS#8 `PrivateKeyInfo` or a PKCS#1 `RSAPrivateKey`
    ///
    /// Only schema mismatches of the PKCS#8 attempt fall back to PKCS#1.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        let (_, obj) = parse_der(der)?;
        match RsaPrivateKey::from_private_key_info(&obj) {
            Err(KeyError::Schema(e)) => {
                debug!("not a PrivateKeyInfo ({}), trying RSAPrivateKey", e);
                RsaPrivateKey::from_rsa_private_key(&obj)
            }
            r => r,
        }
    }

    /// Read a PEM `RSA PRIVATE KEY`
    pub fn from_pkcs1_pem(input: &str) -> Result<Self, KeyError> {
        let (_, der) = pem_body(input, &[PKCS1_PRIVATE_LABEL])?;
        RsaPrivateKey::from_pkcs1_der(&der)
    }

    /// Read a PEM `PRIVATE KEY`
    pub fn from_pkcs8_pem(input: &str) -> Result<Self, KeyError> {
        let (_, der) = pem_body(input, &[PRIVATE_KEY_LABEL])?;
        RsaPrivateKey::from_pkcs8_der(&der)
    }

    /// Read a PEM private key, choosing the structure from the label
    ///
    /// Encrypted PEM messages are rejected with a framing error.
    pub fn from_pem(input: &str) -> Result<Self, KeyError> {
        let (label, der) = pem_body(input, &[PKCS1_PRIVATE_LABEL, PRIVATE_KEY_LABEL])?;
        if label == PKCS1_PRIVATE_LABEL {
            RsaPrivateKey::from_pkcs1_der(&der)
        } else {
            RsaPrivateKey::from_pkcs8_der(&der)
        }
    }
}
