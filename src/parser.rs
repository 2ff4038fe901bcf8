//! Decoding of the fat header and its architecture descriptor table.
//!
//! This is a pure decode step: descriptor byte ranges are not checked against
//! the input length here. Out-of-range entries surface during extraction.

use std::io::{self, Read};

use crate::arch::Architecture;
use crate::error::ParseError;
use crate::ffi::{EfiFatArch, EfiFatHeader, EFI_FAT_MAGIC};
use crate::report::Reporter;

/// What to do with a descriptor whose CPU type is not X86 or X64.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownArchPolicy {
    /// Fail the whole parse with [`ParseError::UnknownCpuType`].
    #[default]
    Abort,
    /// Report the descriptor and leave it out of the result.
    Skip,
}

/// One decoded descriptor, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchEntry {
    /// Position in the descriptor table.
    pub index: u32,
    pub label: Architecture,
    pub cpu_subtype: u32,
    pub offset: u32,
    pub size: u32,
    pub align: u32,
}

/// Read exactly `N` bytes, mapping end-of-input to `on_eof`.
fn read_record<R: Read, const N: usize>(
    r: &mut R,
    on_eof: impl FnOnce() -> ParseError,
) -> Result<[u8; N], ParseError> {
    let mut buf = [0u8; N];
    match r.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(on_eof()),
        Err(e) => Err(e.into()),
    }
}

/// Parse the header and descriptor table from `source`, which must be
/// positioned at the start of the container.
pub fn parse_header<R: Read>(
    source: &mut R,
    policy: UnknownArchPolicy,
    reporter: &mut dyn Reporter,
) -> Result<Vec<ArchEntry>, ParseError> {
    // Magic first: non-fat input shorter than a full header is still BadMagic.
    let magic = u32::from_le_bytes(read_record(source, || ParseError::TruncatedHeader)?);
    if magic != EFI_FAT_MAGIC {
        return Err(ParseError::BadMagic(magic));
    }
    let num_archs = u32::from_le_bytes(read_record(source, || ParseError::TruncatedHeader)?);
    let header = EfiFatHeader { magic, num_archs };
    reporter.header(header.num_archs);

    // num_archs is untrusted, so don't reserve from it.
    let mut entries = Vec::new();
    for index in 0..header.num_archs {
        let buf = read_record::<_, { EfiFatArch::SIZE }>(source, || {
            ParseError::TruncatedDescriptor(index)
        })?;
        let arch = EfiFatArch::from_le_bytes(&buf);

        let label = match Architecture::from_cpu_type(arch.cpu_type) {
            Some(label) => label,
            None => match policy {
                UnknownArchPolicy::Abort => {
                    return Err(ParseError::UnknownCpuType {
                        index,
                        cpu_type: arch.cpu_type,
                    })
                }
                UnknownArchPolicy::Skip => {
                    reporter.skipped(index, arch.cpu_type);
                    continue;
                }
            },
        };

        let entry = ArchEntry {
            index,
            label,
            cpu_subtype: arch.cpu_subtype,
            offset: arch.offset,
            size: arch.size,
            align: arch.align,
        };
        reporter.entry(&entry);
        entries.push(entry);
    }

    Ok(entries)
}
