//! Re-exports of the std io values used throughout the crate.
pub use std::io::{
    BufRead, BufReader, BufWriter, Cursor, Error, ErrorKind, Read, Seek, SeekFrom, Write,
};
