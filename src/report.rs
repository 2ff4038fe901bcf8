//! Progress events emitted by the parser and extractor.
//!
//! The core never touches a global logger; callers pass a [`Reporter`].

use crate::error::ExtractError;
use crate::extractor::ExtractedImage;
use crate::parser::ArchEntry;

pub trait Reporter {
    fn header(&mut self, _num_archs: u32) {}
    fn entry(&mut self, _entry: &ArchEntry) {}
    /// An unsupported CPU type was passed over under `UnknownArchPolicy::Skip`.
    fn skipped(&mut self, _index: u32, _cpu_type: u32) {}
    fn extracted(&mut self, _image: &ExtractedImage) {}
    fn failed(&mut self, _error: &ExtractError) {}
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Forwards events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn header(&mut self, num_archs: u32) {
        log::info!("this is an EFI fat binary with {num_archs} architectures");
    }

    fn entry(&mut self, entry: &ArchEntry) {
        log::info!("architecture {} ({}):", entry.index, entry.label);
        log::info!("  offset: {:#x}", entry.offset);
        log::info!("  size:   {:#x}", entry.size);
        log::debug!(
            "  cpu_subtype: {:#x}, align: {:#x}",
            entry.cpu_subtype,
            entry.align
        );
    }

    fn skipped(&mut self, index: u32, cpu_type: u32) {
        log::warn!("skipping architecture {index}: unknown CPU type {cpu_type:#x}");
    }

    fn extracted(&mut self, image: &ExtractedImage) {
        log::info!(
            "extracted {} section ({:#x} bytes) as '{}'",
            image.label,
            image.bytes.len(),
            image.name
        );
    }

    fn failed(&mut self, error: &ExtractError) {
        log::error!("{error}");
    }
}
