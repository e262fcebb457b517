//! Structures and utilities used for decoding Huffman streams

pub mod bit_reader;
mod stream_decoder;
pub use stream_decoder::*;
