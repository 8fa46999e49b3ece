use der_keys::ber::*;
use der_keys::pem;
use std::env;
use std::io;

/// Dump the objects of DER files, or of every message of PEM files
///
/// Options: `--lenient` to repair bad lengths, `--offsets` to print the
/// position of each object.
pub fn main() -> io::Result<()> {
    let mut options = DecodeOptions::default();
    let mut show_offsets = false;
    for file_name in env::args().skip(1) {
        match file_name.as_ref() {
            "--lenient" => {
                options = DecodeOptions::lenient();
                continue;
            }
            "--offsets" => {
                show_offsets = true;
                continue;
            }
            _ => (),
        }
        let data = std::fs::read(&file_name)?;
        let blobs = match std::str::from_utf8(&data).ok().map(pem::decode_all) {
            Some(Ok(v)) => v
                .into_iter()
                .map(|m| {
                    println!("{}: {}", file_name, m.label);
                    m.contents
                })
                .collect(),
            _ => vec![data],
        };
        for blob in &blobs {
            let (rem, obj) = match parse_ber_with_options(blob, &options) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}: could not parse data: {}", file_name, BerError::from(e));
                    continue;
                }
            };
            let mut pp = obj.as_pretty(0, 2);
            pp.set_flag(PrettyPrinterFlag::ShowHeader);
            if show_offsets {
                pp.set_flag(PrettyPrinterFlag::ShowOffsets);
            }
            println!("{:?}", pp);
            if !rem.is_empty() {
                println!("WARNING: extra bytes after BER/DER object:\n{:x?}", rem);
            }
        }
    }
    Ok(())
}
