//! RSA keys: loading, consistency checks and storing
//!
//! Keys are read from and written to the usual containers:
//!
//! | PEM label         | Structure                            |
//! |-------------------|--------------------------------------|
//! | `RSA PUBLIC KEY`  | PKCS#1 `RSAPublicKey`                |
//! | `PUBLIC KEY`      | X.509 `SubjectPublicKeyInfo`         |
//! | `RSA PRIVATE KEY` | PKCS#1 `RSAPrivateKey`               |
//! | `PRIVATE KEY`     | PKCS#8 `PrivateKeyInfo` (unencrypted) |
//!
//! Only `rsaEncryption` keys are accepted, and only two-prime private keys.
//!
//! Private keys are checked when they are built: the modulus must be the
//! product of the primes, the private exponent must invert the public
//! exponent, and the CRT parameters must match. A failure is reported as
//! [`KeyError::KeyConsistencyFailure`](crate::error::KeyError::KeyConsistencyFailure).

mod decode;
mod encode;
mod key;
mod math;

pub use key::*;

/// PEM label of a PKCS#1 `RSAPublicKey`
pub const PKCS1_PUBLIC_LABEL: &str = "RSA PUBLIC KEY";
/// PEM label of a PKCS#1 `RSAPrivateKey`
pub const PKCS1_PRIVATE_LABEL: &str = "RSA PRIVATE KEY";
/// PEM label of a `SubjectPublicKeyInfo`
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
/// PEM label of an unencrypted PKCS#8 `PrivateKeyInfo`
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
