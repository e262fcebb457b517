//! Errors returned by the bit streams, the header codec and the stream
//! encoder and decoder.
//!
//! Everything funnels into [`Error`], the type returned by
//! [`crate::encode`] and [`crate::decode`].

use crate::io;

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Fewer bits were available than requested.
    EndOfStream { requested_bits: u32 },
    InvalidArgument(ArgumentError),
    CorruptHeader(HeaderError),
    /// The code stream ended before every declared symbol was decoded.
    CorruptStream { decoded: u32, declared: u32 },
    /// Coded data continues after the declared number of symbols.
    CountMismatch { declared: u32, trailing_bytes: u64 },
    /// The encoder's second pass over the source saw different data than the first.
    SourceChanged,
    Io(io::Error),
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgumentError {
    TooManyBits { requested: u32, limit: u32 },
    InputTooLarge { len: u64, limit: u64 },
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeaderError {
    TooManyLeaves { declared: u16 },
    LeafCountMismatch { declared: u16, found: u16 },
    DuplicateSymbol { symbol: u8 },
    LeavesWithoutSymbols { declared: u16 },
    FewerSymbolsThanLeaves { symbols: u32, leaves: u16 },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::EndOfStream { requested_bits } => write!(
                f,
                "Stream ended while trying to read {} more bits",
                requested_bits
            ),
            Error::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            Error::CorruptHeader(e) => write!(f, "Corrupt header: {}", e),
            Error::CorruptStream { decoded, declared } => write!(
                f,
                "Code stream ended after {} of {} declared symbols",
                decoded, declared
            ),
            Error::CountMismatch {
                declared,
                trailing_bytes,
            } => write!(
                f,
                "Found {} bytes of coded data after the {} declared symbols",
                trailing_bytes, declared
            ),
            Error::SourceChanged => write!(
                f,
                "Source changed between the frequency pass and the encoding pass"
            ),
            Error::Io(e) => write!(f, "{}", e),
        }
    }
}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArgumentError::TooManyBits { requested, limit } => write!(
                f,
                "Cant serve a request for {} bits, the limit is {}",
                requested, limit
            ),
            ArgumentError::InputTooLarge { len, limit } => write!(
                f,
                "Input of at least {} bytes is larger than the maximum of {} bytes",
                len, limit
            ),
        }
    }
}

impl core::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HeaderError::TooManyLeaves { declared } => write!(
                f,
                "Tree holds more leaves than the {} declared",
                declared
            ),
            HeaderError::LeafCountMismatch { declared, found } => write!(
                f,
                "Tree terminated after {} leaves but {} were declared",
                found, declared
            ),
            HeaderError::DuplicateSymbol { symbol } => {
                write!(f, "Symbol {:#04x} appears in more than one leaf", symbol)
            }
            HeaderError::LeavesWithoutSymbols { declared } => write!(
                f,
                "Header declares {} leaves but no symbols",
                declared
            ),
            HeaderError::FewerSymbolsThanLeaves { symbols, leaves } => write!(
                f,
                "Header declares {} symbols, fewer than its {} leaves",
                symbols, leaves
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(source) => Some(source),
            Error::InvalidArgument(source) => Some(source),
            Error::CorruptHeader(source) => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for ArgumentError {}

impl std::error::Error for HeaderError {}

impl From<io::Error> for Error {
    fn from(val: io::Error) -> Self {
        Error::Io(val)
    }
}

impl From<ArgumentError> for Error {
    fn from(val: ArgumentError) -> Self {
        Error::InvalidArgument(val)
    }
}

impl From<HeaderError> for Error {
    fn from(val: HeaderError) -> Self {
        Error::CorruptHeader(val)
    }
}
