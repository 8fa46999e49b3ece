//! Schema matching and value capture
//!
//! A [`Schema`] is a static tree describing the expected class, tag and
//! constructed flag of each node of a decoded object. Matching a tree against
//! a schema walks both in lockstep; schema children marked `optional` are
//! skipped when they do not match, and extra children of the decoded tree are
//! ignored. Values marked for capture are stored in a [`Captures`] map, keyed
//! by [`CaptureKey`].
//!
//! ```rust
//! use der_keys::parse_der;
//! use der_keys::validator::{CaptureKey, RSA_PUBLIC_KEY};
//!
//! let bytes = [0x30, 0x07, 0x02, 0x02, 0x0c, 0xa1, 0x02, 0x01, 0x11];
//! let (_, obj) = parse_der(&bytes).expect("parsing failed");
//! let captures = RSA_PUBLIC_KEY.validate(&obj).expect("schema mismatch");
//! assert_eq!(captures.bytes(CaptureKey::PublicKeyExponent), Some(&[0x11][..]));
//! ```
//!
//! The schemas of the PKCS#1 and PKCS#8 structures used by the
//! [`rsa`](crate::rsa) module are provided as statics.

mod capture;
mod pkcs;
mod schema;
mod validate;

pub use capture::*;
pub use pkcs::*;
pub use schema::*;
pub use validate::*;
