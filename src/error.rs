use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while decoding the header and descriptor table. All are fatal for
/// the whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input ends before the 8-byte fat header")]
    TruncatedHeader,

    #[error("not an EFI fat binary (magic {0:#010x})")]
    BadMagic(u32),

    #[error("input ends inside architecture descriptor {0}")]
    TruncatedDescriptor(u32),

    #[error("architecture {index}: unknown CPU type {cpu_type:#x}")]
    UnknownCpuType { index: u32, cpu_type: u32 },

    #[error("I/O error while reading header: {0}")]
    Io(#[from] io::Error),
}

/// Failure extracting one architecture. Scoped to that entry.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("architecture {index}: offset {offset:#x} is past end of input ({len:#x} bytes)")]
    SeekOutOfRange { index: u32, offset: u64, len: u64 },

    #[error("architecture {index}: expected {expected:#x} bytes, only {actual:#x} available")]
    ShortRead {
        index: u32,
        expected: u64,
        actual: u64,
    },

    #[error("architecture {index}: I/O error: {source}")]
    Io {
        index: u32,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    pub fn index(&self) -> u32 {
        match self {
            ExtractError::SeekOutOfRange { index, .. }
            | ExtractError::ShortRead { index, .. }
            | ExtractError::Io { index, .. } => *index,
        }
    }
}

/// Failure writing one extracted image to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("architecture {index}: output name '{name}' already used by architecture {first}")]
    Collision { index: u32, name: String, first: u32 },

    #[error("architecture {index}: failed to write '{}': {source}", path.display())]
    Io {
        index: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
