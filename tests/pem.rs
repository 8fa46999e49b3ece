#[macro_use]
extern crate pretty_assertions;

use der_keys::pem::{self, EncodeConfig, LineEnding, Pem, PemError};

static PKCS1_PEM: &str = include_str!("data/rsa512-pkcs1.pem");
static PKCS1_DER: &[u8] = include_bytes!("data/rsa512-pkcs1.der");
static PUBLIC_PEM: &str = include_str!("data/rsa512-pub.pem");
static ENCRYPTED_PEM: &str = include_str!("data/rsa512-encrypted.pem");

#[test]
fn test_decode_fixture() {
    let msg = pem::decode(PKCS1_PEM).expect("invalid PEM");
    assert_eq!(msg.label, "RSA PRIVATE KEY");
    assert!(msg.headers.is_empty());
    assert_eq!(msg.contents, PKCS1_DER);
}

#[test]
fn test_encode_fixture() {
    let msg = Pem::new("RSA PRIVATE KEY", PKCS1_DER.to_vec());
    assert_eq!(pem::encode(&msg), PKCS1_PEM);
}

#[test]
fn test_crlf() {
    let msg = pem::decode(PUBLIC_PEM).expect("invalid PEM");
    let config = EncodeConfig {
        line_ending: LineEnding::CRLF,
    };
    let s = pem::encode_config(&msg, config);
    assert_eq!(s, PUBLIC_PEM.replace('\n', "\r\n"));
    assert_eq!(pem::decode(&s), Ok(msg));
}

#[test]
fn test_encrypted() {
    assert_eq!(pem::decode(ENCRYPTED_PEM), Err(PemError::Encrypted));
}

#[test]
fn test_bundle() {
    let s = format!("# private\n{}\n# public\n{}", PKCS1_PEM, PUBLIC_PEM);
    let v = pem::decode_all(&s).expect("invalid PEM");
    let labels: Vec<&str> = v.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["RSA PRIVATE KEY", "PUBLIC KEY"]);
    // an error in any message fails the whole input
    let s = format!("{}{}", PUBLIC_PEM, ENCRYPTED_PEM);
    assert_eq!(pem::decode_all(&s), Err(PemError::Encrypted));
}
