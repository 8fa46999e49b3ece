use crate::ber::BerObject;
use std::collections::btree_map::{self, BTreeMap};

/// Name of a captured value
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaptureKey {
    // PrivateKeyInfo
    PrivateKeyInfoVersion,
    PrivateKeyOid,
    PrivateKey,
    // RSAPrivateKey
    PrivateKeyVersion,
    PrivateKeyModulus,
    PrivateKeyPublicExponent,
    PrivateKeyPrivateExponent,
    PrivateKeyPrime1,
    PrivateKeyPrime2,
    PrivateKeyExponent1,
    PrivateKeyExponent2,
    PrivateKeyCoefficient,
    // SubjectPublicKeyInfo and RSAPublicKey
    SubjectPublicKeyInfo,
    PublicKeyOid,
    SubjectPublicKey,
    RsaPublicKey,
    PublicKeyModulus,
    PublicKeyExponent,
    // DigestInfo
    DigestAlgorithm,
    DigestParameters,
    Digest,
    /// Key for user-defined schemas
    Custom(&'static str),
}

/// A captured value: content octets, or a whole object
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Captured<'o> {
    Bytes(&'o [u8]),
    Object(&'o BerObject<'o>),
}

/// Values captured while matching a schema
///
/// Captured values borrow from the matched tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Captures<'o> {
    map: BTreeMap<CaptureKey, Captured<'o>>,
}

impl<'o> Captures<'o> {
    pub fn new() -> Self {
        Captures::default()
    }

    /// Store a value, replacing any previous value with the same key
    pub fn insert(&mut self, key: CaptureKey, value: Captured<'o>) {
        self.map.insert(key, value);
    }

    pub fn get(&self, key: CaptureKey) -> Option<Captured<'o>> {
        self.map.get(&key).copied()
    }

    /// Captured content octets
    ///
    /// Returns `None` if nothing was captured under `key`, or if a whole object was.
    pub fn bytes(&self, key: CaptureKey) -> Option<&'o [u8]> {
        match self.get(key)? {
            Captured::Bytes(b) => Some(b),
            Captured::Object(_) => None,
        }
    }

    /// Captured object
    pub fn object(&self, key: CaptureKey) -> Option<&'o BerObject<'o>> {
        match self.get(key)? {
            Captured::Object(o) => Some(o),
            Captured::Bytes(_) => None,
        }
    }

    pub fn contains(&self, key: CaptureKey) -> bool {
        self.map.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CaptureKey, Captured<'o>> {
        self.map.iter()
    }
}
