#![no_main]
extern crate libfuzzer_sys;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = der_keys::parse_ber(data);
    let _ = der_keys::ber::parse_ber_with_options(data, &der_keys::DecodeOptions::lenient());
});
