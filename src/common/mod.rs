//! Values shared between the encoding side
//! and the decoding side.

// --- HEADER ---
/// Width of the field holding the number of encoded symbols.
pub const SYMBOL_COUNT_BITS: u32 = 32;
/// Width of the field holding the number of leaves in the tree.
///
/// A full alphabet of 256 leaves does not fit and is stored as 0, see
/// [`crate::header`].
pub const LEAF_COUNT_BITS: u32 = 8;
/// Tag preceding a leaf in the serialized tree.
pub const LEAF_TAG: u64 = 1;
/// Tag closing an internal node, and terminating the serialized tree.
pub const INTERNAL_TAG: u64 = 0;
/// Width of the symbol value stored after a leaf tag.
pub const SYMBOL_BITS: u32 = 8;

// --- ALPHABET ---
/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;
/// The largest number of symbols a single stream can declare.
pub const MAX_SYMBOL_COUNT: u64 = u32::MAX as u64;

// --- BIT IO ---
/// Neither the reader nor the writer can serve more than this many bits at once.
pub const MAX_BITS_PER_CALL: u32 = 64;

/// Size of an encoded empty input: both counts and the tree terminator, padded.
pub const MIN_STREAM_SIZE: usize = 6;
