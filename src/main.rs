use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use efi_lipo::{
    extract_all,
    output::{write_images, WriteOutcome},
    parse_header,
    report::LogReporter,
    ArchEntry, ParseError, UnknownArchPolicy,
};
use inquire::Confirm;
use std::{
    fs::{metadata, File},
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Split Apple EFI fat binaries into one file per architecture
#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// The EFI fat binary to split
    input_file: PathBuf,
    /// Directory to write the extracted images to
    #[arg(long, short, default_value = ".")]
    output_dir: PathBuf,
    /// Skip architectures with an unknown CPU type instead of stopping
    #[arg(long, short)]
    skip_unknown: bool,
    /// Only list the architectures, write nothing
    #[arg(long, short)]
    list: bool,
    /// Overwrite existing files without asking for confirmation
    #[arg(long, short('y'))]
    all_yes: bool,
    /// Log debug details
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// The input's file name, used verbatim as the output name prefix.
fn base_name(input: &Path) -> Result<&str> {
    input
        .file_name()
        .with_context(|| format!("`{}` has no file name", input.display()))?
        .to_str()
        .with_context(|| format!("file name of `{}` is not valid UTF-8", input.display()))
}

trait Utils {
    fn ask_for_confirmation(&self, msg: &str) -> bool;
    fn policy(&self) -> UnknownArchPolicy;
    fn run(&self) -> Result<ExitCode>;
    fn print_table(&self, entries: &[ArchEntry]);
}

impl Utils for Args {
    fn ask_for_confirmation(&self, msg: &str) -> bool {
        if self.all_yes {
            return true;
        }

        Confirm::new(msg)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }

    fn policy(&self) -> UnknownArchPolicy {
        if self.skip_unknown {
            UnknownArchPolicy::Skip
        } else {
            UnknownArchPolicy::Abort
        }
    }

    fn run(&self) -> Result<ExitCode> {
        let input = &self.input_file;
        if !metadata(input)
            .with_context(|| format!("cannot access `{}`", input.display()))?
            .is_file()
        {
            anyhow::bail!("`{}` is not a file", input.display());
        }

        let base_name = base_name(input)?;

        let file =
            File::open(input).with_context(|| format!("failed to open `{}`", input.display()))?;
        let mut reader = BufReader::new(file);

        log::info!("processing '{}'", input.display());
        let mut reporter = LogReporter;
        let entries = match parse_header(&mut reader, self.policy(), &mut reporter) {
            Ok(entries) => entries,
            Err(e @ ParseError::BadMagic(_)) => {
                eprintln!("[~] {}", e.to_string().red());
                return Ok(ExitCode::from(2));
            }
            Err(e) => {
                eprintln!("[~] {}", e.to_string().red());
                return Ok(ExitCode::FAILURE);
            }
        };

        if self.list {
            self.print_table(&entries);
            return Ok(ExitCode::SUCCESS);
        }

        let mut failed = 0usize;
        let mut images = Vec::with_capacity(entries.len());
        for result in extract_all(&mut reader, &entries, base_name, &mut reporter) {
            match result {
                Ok(image) => images.push(image),
                Err(e) => {
                    eprintln!("[~] {}", e.to_string().red());
                    failed += 1;
                }
            }
        }

        let outcomes = write_images(&images, &self.output_dir, |path: &Path| {
            self.ask_for_confirmation(&format!(
                "Output file `{}` already exists, overwrite?",
                path.display()
            ))
        });
        for outcome in outcomes {
            match outcome {
                Ok(WriteOutcome::Written { path, .. }) => {
                    println!("wrote {}", path.display().to_string().green());
                }
                Ok(WriteOutcome::Declined { path, .. }) => {
                    println!("kept existing {}", path.display().to_string().yellow());
                }
                Err(e) => {
                    eprintln!("[~] {}", e.to_string().red());
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            eprintln!(
                "{}",
                format!("{failed} architecture(s) could not be extracted").red()
            );
            return Ok(ExitCode::FAILURE);
        }

        println!("{}", "Done!".green().bold());
        Ok(ExitCode::SUCCESS)
    }

    fn print_table(&self, entries: &[ArchEntry]) {
        println!("find {} archs", entries.len());
        for entry in entries {
            println!(
                "  [{}] {} cpu_subtype: {:#x} offset: {:#x} size: {:#x} align: {:#x}",
                entry.index,
                entry.label.as_str().red(),
                entry.cpu_subtype,
                entry.offset,
                entry.size,
                entry.align
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn base_name_is_file_name() {
        assert_eq!(
            base_name(Path::new("/tmp/fw/firmware.fd")).unwrap(),
            "firmware.fd"
        );
    }

    #[test]
    fn base_name_needs_file_name() {
        assert!(base_name(Path::new("/")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn base_name_rejects_invalid_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"/tmp/fw\xff.fd"));
        assert!(base_name(input).is_err());
    }
}
