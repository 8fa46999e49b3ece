#![no_main]
extern crate libfuzzer_sys;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = der_keys::rsa::RsaPrivateKey::from_der(data);
    let _ = der_keys::rsa::RsaPublicKey::from_der(data);
});
