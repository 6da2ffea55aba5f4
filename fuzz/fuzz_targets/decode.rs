// cargo fuzz run decode corpus/decode -- -timeout=30

#![no_main]

use std::io::Cursor;
use libfuzzer_sys::fuzz_target;

use gifmeta::Decoder;

fuzz_target!(|data: &[u8]| {
    let _ = Decoder::new(Cursor::new(data)).decode();
});
