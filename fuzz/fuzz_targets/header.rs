#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;
use huffpack::decoding::bit_reader::BitReader;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = huffpack::read_header(&mut BitReader::new(data)) {
        assert_eq!(header.tree.is_none(), header.symbol_count == 0);
        assert!(header.leaf_count() as u64 <= u64::from(header.symbol_count));
    }
});
