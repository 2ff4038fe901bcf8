//! Writing extracted images next to each other in one directory.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::extractor::ExtractedImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { index: u32, path: PathBuf },
    /// The file already existed and overwriting it was declined.
    Declined { index: u32, path: PathBuf },
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}

/// Write each image to `dir/<image.name>`.
///
/// The first image to claim a name wins; later images with the same name are
/// reported as [`OutputError::Collision`] and not written. If a file is
/// already on disk, `confirm_overwrite` decides whether to replace it.
pub fn write_images<F>(
    images: &[ExtractedImage],
    dir: &Path,
    mut confirm_overwrite: F,
) -> Vec<Result<WriteOutcome, OutputError>>
where
    F: FnMut(&Path) -> bool,
{
    let mut claimed: HashMap<&str, u32> = HashMap::new();
    images
        .iter()
        .map(|image| {
            let index = image.index;
            if let Some(&first) = claimed.get(image.name.as_str()) {
                return Err(OutputError::Collision {
                    index,
                    name: image.name.clone(),
                    first,
                });
            }
            claimed.insert(&image.name, index);

            let path = dir.join(&image.name);
            if path.exists() && !confirm_overwrite(&path) {
                return Ok(WriteOutcome::Declined { index, path });
            }
            log::info!("saving {} section to '{}'", image.label, path.display());
            match write_file(&path, &image.bytes) {
                Ok(()) => Ok(WriteOutcome::Written { index, path }),
                Err(source) => Err(OutputError::Io {
                    index,
                    path,
                    source,
                }),
            }
        })
        .collect()
}
