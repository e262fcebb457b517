//! A lossless byte-stream compressor built on Huffman prefix coding.
//!
//! The two entry points are [`encode`] and [`decode`]. Both work on plain
//! [`std::io`] streams and never open files or print anything on their own.
//!
//! ```
//! let input = b"abacabadabacaba";
//! let packed = huffpack::encode_to_vec(input).unwrap();
//! let unpacked = huffpack::decode_to_vec(&packed).unwrap();
//! assert_eq!(&unpacked[..], &input[..]);
//! ```
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod header;
pub mod tree;

pub mod io;

pub use decoding::decode;
pub use encoding::encode;
pub use errors::Error;
pub use header::{read_header, write_header, Header};

/// Compress an in-memory buffer, returning the encoded stream.
pub fn encode_to_vec(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut output = Vec::with_capacity(data.len() / 2 + common::MIN_STREAM_SIZE);
    encode(io::Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress an in-memory encoded stream.
pub fn decode_to_vec(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut output = Vec::with_capacity(data.len() * 2);
    decode(data, &mut output)?;
    Ok(output)
}

/// Encode and decode `data`, panicking if the result differs from the input.
#[cfg(feature = "fuzz_exports")]
pub fn round_trip(data: &[u8]) {
    let encoded = encode_to_vec(data).unwrap();
    let decoded = decode_to_vec(&encoded).unwrap();
    assert_eq!(data, &decoded[..]);
}
