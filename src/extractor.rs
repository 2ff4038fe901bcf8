//! Bounds-checked extraction of each architecture's byte range.

use std::io::{Read, Seek, SeekFrom};

use crate::arch::Architecture;
use crate::error::ExtractError;
use crate::parser::ArchEntry;
use crate::report::Reporter;

/// Raw bytes of one architecture, exactly as stored in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub index: u32,
    pub label: Architecture,
    pub bytes: Vec<u8>,
    /// Suggested output name, `<base_name>.<label>`.
    pub name: String,
}

pub fn output_name(base_name: &str, label: Architecture) -> String {
    format!("{base_name}.{label}")
}

fn extract_one<R: Read + Seek>(
    source: &mut R,
    entry: &ArchEntry,
    base_name: &str,
) -> Result<ExtractedImage, ExtractError> {
    let index = entry.index;
    let io = |source| ExtractError::Io { index, source };

    let len = source.seek(SeekFrom::End(0)).map_err(io)?;
    let offset = u64::from(entry.offset);
    if offset > len {
        return Err(ExtractError::SeekOutOfRange { index, offset, len });
    }
    source.seek(SeekFrom::Start(offset)).map_err(io)?;

    let expected = u64::from(entry.size);
    // Never reserve more than the input can actually hold.
    let mut bytes = Vec::with_capacity(expected.min(len - offset) as usize);
    source
        .by_ref()
        .take(expected)
        .read_to_end(&mut bytes)
        .map_err(io)?;

    let actual = bytes.len() as u64;
    if actual < expected {
        return Err(ExtractError::ShortRead {
            index,
            expected,
            actual,
        });
    }

    Ok(ExtractedImage {
        index,
        label: entry.label,
        bytes,
        name: output_name(base_name, entry.label),
    })
}

/// Extract every entry in order. A failed entry does not stop the others;
/// the caller decides what an individual failure means for the whole run.
///
/// Duplicate labels yield duplicate names, which are left for the output
/// layer to resolve.
pub fn extract_all<R: Read + Seek>(
    source: &mut R,
    entries: &[ArchEntry],
    base_name: &str,
    reporter: &mut dyn Reporter,
) -> Vec<Result<ExtractedImage, ExtractError>> {
    entries
        .iter()
        .map(|entry| {
            let result = extract_one(source, entry, base_name);
            match &result {
                Ok(image) => reporter.extracted(image),
                Err(e) => reporter.failed(e),
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;
    use crate::report::NullReporter;

    fn entry(index: u32, label: Architecture, offset: u32, size: u32) -> ArchEntry {
        ArchEntry {
            index,
            label,
            cpu_subtype: 3,
            offset,
            size,
            align: 0,
        }
    }

    fn extract(data: &[u8], entries: &[ArchEntry]) -> Vec<Result<ExtractedImage, ExtractError>> {
        extract_all(
            &mut Cursor::new(data),
            entries,
            "firmware.fd",
            &mut NullReporter,
        )
    }

    #[test]
    fn name_from_label() {
        assert_eq!(output_name("firmware.fd", Architecture::X64), "firmware.fd.X64");
    }

    #[test]
    fn no_entries_no_images() {
        assert!(extract(b"whatever", &[]).is_empty());
    }

    #[test]
    fn exact_ranges() {
        let data = b"0123456789abcdef";
        let results = extract(
            data,
            &[
                entry(0, Architecture::X64, 10, 6),
                entry(1, Architecture::X86, 2, 3),
            ],
        );
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.bytes, b"abcdef");
        assert_eq!(first.name, "firmware.fd.X64");
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.bytes, b"234");
        assert_eq!(second.name, "firmware.fd.X86");
    }

    #[test]
    fn overlapping_ranges() {
        let data = b"0123456789";
        let results = extract(
            data,
            &[
                entry(0, Architecture::X86, 0, 6),
                entry(1, Architecture::X64, 4, 6),
            ],
        );
        assert_eq!(results[0].as_ref().unwrap().bytes, b"012345");
        assert_eq!(results[1].as_ref().unwrap().bytes, b"456789");
    }

    #[test]
    fn empty_range_at_end() {
        let results = extract(b"0123", &[entry(0, Architecture::X86, 4, 0)]);
        assert!(results[0].as_ref().unwrap().bytes.is_empty());
    }

    #[test]
    fn offset_past_end() {
        let results = extract(
            b"0123456789",
            &[
                entry(0, Architecture::X86, 0x1000, 4),
                entry(1, Architecture::X64, 0, 4),
            ],
        );
        assert!(matches!(
            results[0],
            Err(ExtractError::SeekOutOfRange {
                index: 0,
                offset: 0x1000,
                len: 10
            })
        ));
        assert_eq!(results[1].as_ref().unwrap().bytes, b"0123");
    }

    #[test]
    fn size_past_end() {
        let results = extract(
            b"0123456789",
            &[
                entry(0, Architecture::X64, 0, 2),
                entry(1, Architecture::X86, 8, 0xffff_ffff),
                entry(2, Architecture::X64, 2, 2),
            ],
        );
        assert_eq!(results[0].as_ref().unwrap().bytes, b"01");
        match &results[1] {
            Err(ExtractError::ShortRead {
                index,
                expected,
                actual,
            }) => {
                assert_eq!(*index, 1);
                assert_eq!(*expected, 0xffff_ffff);
                assert_eq!(*actual, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(results[2].as_ref().unwrap().bytes, b"23");
    }

    #[test]
    fn duplicate_labels_keep_own_names() {
        let results = extract(
            b"aabb",
            &[
                entry(0, Architecture::X64, 0, 2),
                entry(1, Architecture::X64, 2, 2),
            ],
        );
        let names: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["firmware.fd.X64", "firmware.fd.X64"]);
    }
}
