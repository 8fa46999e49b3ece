#![no_main]
extern crate libfuzzer_sys;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((_, obj)) = der_keys::parse_der(data) {
        let _ = obj.to_vec();
    }
});
