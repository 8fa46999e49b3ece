//! Schemas of the PKCS#1 and PKCS#8 key structures
//!
//! See RFC 8017 appendix A.1 and RFC 5208 section 5.

use super::{CaptureKey, Schema};
use crate::ber::Tag;

const fn integer(name: &'static str, key: CaptureKey) -> Schema {
    Schema::universal(name, Tag::Integer, false).capture(key)
}

static ALGORITHM_IDENTIFIER_FIELDS: [Schema; 1] =
    [Schema::universal("AlgorithmIdentifier.algorithm", Tag::Oid, false).capture(CaptureKey::PrivateKeyOid)];

static PRIVATE_KEY_INFO_FIELDS: [Schema; 3] = [
    integer("PrivateKeyInfo.version", CaptureKey::PrivateKeyInfoVersion),
    Schema::sequence("PrivateKeyInfo.privateKeyAlgorithm", &ALGORITHM_IDENTIFIER_FIELDS),
    Schema::universal("PrivateKeyInfo.privateKey", Tag::OctetString, false).capture(CaptureKey::PrivateKey),
];

/// PKCS#8 `PrivateKeyInfo`
///
/// Captures the version, the algorithm OID and the content of the
/// `privateKey` OCTET STRING.
pub static PRIVATE_KEY_INFO: Schema = Schema::sequence("PrivateKeyInfo", &PRIVATE_KEY_INFO_FIELDS);

static RSA_PRIVATE_KEY_FIELDS: [Schema; 9] = [
    integer("RSAPrivateKey.version", CaptureKey::PrivateKeyVersion),
    integer("RSAPrivateKey.modulus", CaptureKey::PrivateKeyModulus),
    integer("RSAPrivateKey.publicExponent", CaptureKey::PrivateKeyPublicExponent),
    integer("RSAPrivateKey.privateExponent", CaptureKey::PrivateKeyPrivateExponent),
    integer("RSAPrivateKey.prime1", CaptureKey::PrivateKeyPrime1),
    integer("RSAPrivateKey.prime2", CaptureKey::PrivateKeyPrime2),
    integer("RSAPrivateKey.exponent1", CaptureKey::PrivateKeyExponent1),
    integer("RSAPrivateKey.exponent2", CaptureKey::PrivateKeyExponent2),
    integer("RSAPrivateKey.coefficient", CaptureKey::PrivateKeyCoefficient),
];

/// PKCS#1 `RSAPrivateKey`
///
/// `otherPrimeInfos` (multi-prime keys) is not matched, and is ignored if present.
pub static RSA_PRIVATE_KEY: Schema = Schema::sequence("RSAPrivateKey", &RSA_PRIVATE_KEY_FIELDS);

static RSA_PUBLIC_KEY_FIELDS: [Schema; 2] = [
    integer("RSAPublicKey.modulus", CaptureKey::PublicKeyModulus),
    integer("RSAPublicKey.exponent", CaptureKey::PublicKeyExponent),
];

/// PKCS#1 `RSAPublicKey`
pub static RSA_PUBLIC_KEY: Schema = Schema::sequence("RSAPublicKey", &RSA_PUBLIC_KEY_FIELDS);

static SPKI_ALGORITHM_FIELDS: [Schema; 1] =
    [Schema::universal("AlgorithmIdentifier.algorithm", Tag::Oid, false).capture(CaptureKey::PublicKeyOid)];

static SPKI_PUBLIC_KEY_FIELDS: [Schema; 1] = [Schema::universal(
    "SubjectPublicKeyInfo.subjectPublicKey.RSAPublicKey",
    Tag::Sequence,
    true,
)
.optional()
.capture_asn1(CaptureKey::RsaPublicKey)];

static SPKI_FIELDS: [Schema; 2] = [
    Schema::sequence("SubjectPublicKeyInfo.AlgorithmIdentifier", &SPKI_ALGORITHM_FIELDS),
    Schema::universal("SubjectPublicKeyInfo.subjectPublicKey", Tag::BitString, false)
        .capture_bitstring_value(CaptureKey::SubjectPublicKey)
        .with_children(&SPKI_PUBLIC_KEY_FIELDS),
];

/// X.509 `SubjectPublicKeyInfo`
///
/// When the BIT STRING was decoded as an encapsulated object, the inner
/// RSAPublicKey is captured as `RsaPublicKey`. The BIT STRING value is always
/// captured as `SubjectPublicKey`.
pub static SUBJECT_PUBLIC_KEY_INFO: Schema =
    Schema::sequence("SubjectPublicKeyInfo", &SPKI_FIELDS).capture_asn1(CaptureKey::SubjectPublicKeyInfo);

static DIGEST_ALGORITHM_FIELDS: [Schema; 2] = [
    Schema::universal("DigestInfo.DigestAlgorithm.algorithm", Tag::Oid, false)
        .capture(CaptureKey::DigestAlgorithm),
    // parameters (NULL, or absent)
    Schema::any("DigestInfo.DigestAlgorithm.parameters")
        .optional()
        .capture_asn1(CaptureKey::DigestParameters),
];

static DIGEST_INFO_FIELDS: [Schema; 2] = [
    Schema::sequence("DigestInfo.DigestAlgorithm", &DIGEST_ALGORITHM_FIELDS),
    Schema::universal("DigestInfo.digest", Tag::OctetString, false).capture(CaptureKey::Digest),
];

/// PKCS#1 `DigestInfo`, as found in PKCS#1 v1.5 signatures
pub static DIGEST_INFO: Schema = Schema::sequence("DigestInfo", &DIGEST_INFO_FIELDS);
