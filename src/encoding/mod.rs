//! Modules used for compressing/encoding data into the Huffman stream format.
pub mod bit_writer;
pub mod code_table;
pub mod frequency;
mod stream_encoder;
pub use stream_encoder::*;
