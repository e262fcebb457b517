#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;

fuzz_target!(|data: &[u8]| {
    let mut output = Vec::new();
    // errors are fine, panics are not
    let _ = huffpack::decode(data, &mut output);
});
