//! # ASN.1 DER codec, schema capture and RSA keys
//!
//! A decoder and encoder for Basic Encoding Rules (BER [[X.690]]) and Distinguished Encoding
//! Rules (DER [[X.690]]), a declarative schema matcher that extracts named values from decoded
//! trees, and the loading and storing of RSA keys (PKCS#1 and PKCS#8 / SubjectPublicKeyInfo, in
//! DER or PEM form) built on top of them.
//!
//! # Decoding
//!
//! Objects are decoded recursively into a tree of [`BerObject`](ber/struct.BerObject.html).
//! Content octets are borrowed from the input buffer.
//!
//! ```rust
//! use der_keys::parse_der;
//!
//! let bytes = [ 0x30, 0x0a,
//!               0x02, 0x03, 0x01, 0x00, 0x01,
//!               0x02, 0x03, 0x01, 0x00, 0x00,
//! ];
//!
//! let (_, obj) = parse_der(&bytes).expect("parsing failed");
//! assert_eq!(obj[0].as_u64(), Ok(0x10001));
//! ```
//!
//! The decoder can be configured with [`DecodeOptions`](ber/struct.DecodeOptions.html):
//!
//! - in strict mode (the default), a declared length that runs past its container, or an
//!   indefinite length on a primitive value, is an error. Lenient mode repairs them;
//! - BIT STRING and OCTET STRING values whose content is a valid DER object are decoded as
//!   nested objects (this is how keys are wrapped in PKCS#8 and SubjectPublicKeyInfo). The raw
//!   content of a BIT STRING is kept, so that it can be encoded back unchanged;
//! - nesting depth is bounded.
//!
//! # Encoding
//!
//! [`BerObject::to_vec`](ber/struct.BerObject.html#method.to_vec) produces DER: definite
//! minimal lengths, and trimmed integers.
//!
//! # Schemas
//!
//! A [`Schema`](validator/struct.Schema.html) describes the expected shape of a tree, and names
//! the values to capture. See the [`validator`](validator/index.html) module.
//!
//! # RSA keys
//!
//! ```rust,no_run
//! use der_keys::rsa::{RsaPrivateKey, PublicKeyParts};
//!
//! # let pem = "";
//! let key = RsaPrivateKey::from_pem(pem).expect("invalid key");
//! println!("modulus size: {} bits", key.n().bits());
//! ```
//!
//! Every parameter of a private key is cross-checked when it is loaded.
//!
//! # References
//!
//! - [[X.680]] Abstract Syntax Notation One (ASN.1): Specification of basic notation.
//! - [[X.690]] ASN.1 encoding rules: Specification of Basic Encoding Rules (BER), Canonical
//!   Encoding Rules (CER) and Distinguished Encoding Rules (DER).
//! - [RFC 8017] PKCS #1: RSA Cryptography Specifications Version 2.2
//! - [RFC 5208] Public-Key Cryptography Standards (PKCS) #8
//! - [RFC 7468] Textual Encodings of PKIX, PKCS, and CMS Structures
//!
//! [X.680]: http://www.itu.int/rec/T-REC-X.680/en "Abstract Syntax Notation One (ASN.1):
//!   Specification of basic notation."
//! [X.690]: https://www.itu.int/rec/T-REC-X.690/en "ASN.1 encoding rules: Specification of
//!   Basic Encoding Rules (BER), Canonical Encoding Rules (CER) and Distinguished Encoding Rules
//!   (DER)."
//! [RFC 8017]: https://tools.ietf.org/html/rfc8017
//! [RFC 5208]: https://tools.ietf.org/html/rfc5208
//! [RFC 7468]: https://tools.ietf.org/html/rfc7468

#![deny(/*missing_docs,*/unsafe_code,
        unstable_features,
        unused_import_braces, unused_qualifications)]

#[macro_use]
mod macros;

#[allow(clippy::module_inception)]
pub mod ber;
pub mod cursor;
pub mod der;
pub mod error;
pub mod oid;
pub mod pem;
pub mod rsa;
pub mod validator;

// re-export at crate root
pub use ber::{parse_ber, BerObject, DecodeOptions};
pub use der::{from_der, parse_der};

#[doc(hidden)]
pub use der_keys_oid_macro::encode_oid;

pub use num_bigint;
