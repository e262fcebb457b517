//! Contains [`FrequencyTable`], the per-byte occurrence
//! counts the tree is built from.

use crate::common::{ALPHABET_SIZE, MAX_SYMBOL_COUNT};
use crate::errors::{ArgumentError, Error};
use crate::io::{ErrorKind, Read};

const READ_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    /// Count every byte `source` yields until it reports end of stream.
    ///
    /// Fails with [`ArgumentError::InputTooLarge`] as soon as the total no longer
    /// fits the 32 bit symbol count of the header.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self, Error> {
        let mut table = FrequencyTable {
            counts: [0; ALPHABET_SIZE],
            total: 0,
        };
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let read = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &buf[..read] {
                table.counts[usize::from(byte)] += 1;
            }
            table.total += read as u64;
            if table.total > MAX_SYMBOL_COUNT {
                return Err(ArgumentError::InputTooLarge {
                    len: table.total,
                    limit: MAX_SYMBOL_COUNT,
                }
                .into());
            }
        }
        Ok(table)
    }

    /// Occurrences of `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[usize::from(symbol)]
    }

    /// Sum of all counts. Never above `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.total as u32
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Every byte value that occurs, with its count, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .map(move |symbol| (symbol, self.count(symbol)))
            .filter(|&(_, count)| count > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
