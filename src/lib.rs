//! Splitting of Apple EFI fat binaries into their per-architecture images.
//!
//! [`parser::parse_header`] decodes the descriptor table, then
//! [`extractor::extract_all`] pulls each architecture's bytes out of the same
//! source. Progress is reported through a caller-supplied
//! [`report::Reporter`].

pub mod arch;
pub mod error;
pub mod extractor;
pub mod ffi;
pub mod output;
pub mod parser;
pub mod report;

pub use arch::Architecture;
pub use error::{ExtractError, OutputError, ParseError};
pub use extractor::{extract_all, ExtractedImage};
pub use parser::{parse_header, ArchEntry, UnknownArchPolicy};
