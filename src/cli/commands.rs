// CLI command implementations
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_json::{json, Value};

use crate::cli::output::{OutputFormatter, ProgressBar};
use crate::cli::{CliResult, Commands, Config};
use id3scan::id3::frames::frame_ids;
use id3scan::{read_tag_from_path, DecodedFrame, Id3Tag, ParseOptions, Picture, TagError, TagHeader};

/// Run the selected subcommand. Returns the number of files that failed.
pub fn run(config: &Config) -> CliResult<usize> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let options = config.parse_options();

    match &config.command {
        Commands::Read {
            files,
            with_artwork,
            output,
        } => command_read(files, *with_artwork, output.as_deref(), &options, &formatter),
        Commands::Frames { files } => command_frames(files, &options, &formatter),
        Commands::Detect { files } => command_detect(files, &options, &formatter),
        Commands::Batch { directory, pattern } => command_batch(directory, pattern, &options, &formatter),
        Commands::ExportCover { file, output } => {
            command_export_cover(file, output, &options, &formatter).map(|()| 0)
        }
    }
}

/// Outcome of reading one file, with the "no tag" case kept apart from errors
enum FileOutcome {
    Tagged(Id3Tag),
    Untagged,
    Failed(TagError),
}

fn read_file(path: &Path, options: &ParseOptions) -> FileOutcome {
    match read_tag_from_path(path, options) {
        Ok(Some(tag)) => FileOutcome::Tagged(tag),
        Ok(None) => {
            tracing::info!(path = %path.display(), "no ID3v2 tag");
            FileOutcome::Untagged
        }
        Err(e) => FileOutcome::Failed(e),
    }
}

/// Replace the base64 picture bytes at `pointer` with the size of `picture`.
fn elide_picture_data(value: &mut Value, pointer: &str, picture: Option<&Picture>) {
    if let (Some(data), Some(picture)) = (value.pointer_mut(pointer), picture) {
        *data = Value::String(format!("<{} bytes>", picture.data.len()));
    }
}

fn with_file_key(mut value: Value, path: &Path) -> Value {
    if let Some(obj) = value.as_object_mut() {
        obj.insert("file".to_string(), Value::String(path.display().to_string()));
    }
    value
}

/// Print the tag record of each file
fn command_read(
    files: &[PathBuf],
    with_artwork: bool,
    output: Option<&Path>,
    options: &ParseOptions,
    formatter: &OutputFormatter,
) -> CliResult<usize> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut failures = 0;
    for path in files {
        match read_file(path, options) {
            FileOutcome::Tagged(tag) => {
                let record = tag.record();
                let mut value = serde_json::to_value(&record)?;
                if !with_artwork {
                    elide_picture_data(&mut value, "/artwork/data", record.artwork.as_ref());
                }
                formatter.output_metadata(&with_file_key(value, path), &mut *writer)?;
            }
            FileOutcome::Untagged => formatter.print_info(&format!("{}: no ID3v2 tag", path.display())),
            FileOutcome::Failed(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }

    writer.flush()?;
    Ok(failures)
}

/// Print the raw frame map of each file
fn command_frames(files: &[PathBuf], options: &ParseOptions, formatter: &OutputFormatter) -> CliResult<usize> {
    let mut stdout = std::io::stdout();
    let mut failures = 0;

    for path in files {
        match read_file(path, options) {
            FileOutcome::Tagged(tag) => {
                let mut value = serde_json::to_value(&tag)?;
                let picture = match tag.frame(frame_ids::PICTURE) {
                    Some(DecodedFrame::Picture(picture)) => Some(picture),
                    _ => None,
                };
                elide_picture_data(&mut value, "/frames/APIC/picture/data", picture);
                formatter.output_metadata(&with_file_key(value, path), &mut stdout)?;
            }
            FileOutcome::Untagged => formatter.print_info(&format!("{}: no ID3v2 tag", path.display())),
            FileOutcome::Failed(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }

    Ok(failures)
}

fn detect_value(path: &Path, header: &TagHeader) -> Value {
    json!({
        "file": path.display().to_string(),
        "version": header.version_string(),
        "tag_size": header.tag_size,
    })
}

/// Report the header of each file without walking its frames
fn command_detect(files: &[PathBuf], options: &ParseOptions, formatter: &OutputFormatter) -> CliResult<usize> {
    let mut stdout = std::io::stdout();
    let mut failures = 0;

    for path in files {
        let header = File::open(path)
            .map_err(TagError::from)
            .and_then(|mut file| TagHeader::read(&mut file, options));

        match header {
            Ok(Some(header)) => formatter.output_metadata(&detect_value(path, &header), &mut stdout)?,
            Ok(None) => formatter.print_info(&format!("{}: no ID3v2 tag", path.display())),
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }

    Ok(failures)
}

/// Build the glob for a batch run. Patterns without wildcards match file
/// names anywhere below the directory.
fn batch_glob(directory: &Path, pattern: &str) -> String {
    if pattern.contains('*') || pattern.contains('?') {
        format!("{}/{}", directory.display(), pattern)
    } else {
        format!("{}/**/{}", directory.display(), pattern)
    }
}

/// Parse every matching file; untagged files are not failures
fn command_batch(
    directory: &Path,
    pattern: &str,
    options: &ParseOptions,
    formatter: &OutputFormatter,
) -> CliResult<usize> {
    if !directory.is_dir() {
        bail!("not a directory: {}", directory.display());
    }

    let glob_pattern = batch_glob(directory, pattern);
    let files: Vec<PathBuf> = glob::glob(&glob_pattern)
        .with_context(|| format!("invalid glob pattern: {}", glob_pattern))?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .collect();

    tracing::info!(pattern = %glob_pattern, count = files.len(), "batch started");

    let mut progress = ProgressBar::new(files.len(), !formatter.is_quiet());
    let (mut tagged, mut untagged) = (0usize, 0usize);
    let mut errors = Vec::new();

    for path in &files {
        match read_file(path, options) {
            FileOutcome::Tagged(_) => tagged += 1,
            FileOutcome::Untagged => untagged += 1,
            FileOutcome::Failed(e) => errors.push((path, e)),
        }
        progress.increment();
    }

    for (path, e) in &errors {
        formatter.print_error(&format!("{}: {}", path.display(), e));
    }
    formatter.print_success(&format!(
        "{} files: {} tagged, {} without tag, {} failed",
        files.len(),
        tagged,
        untagged,
        errors.len()
    ));

    Ok(errors.len())
}

/// Write the APIC payload to `<output>/<file stem>.<ext>`
fn command_export_cover(
    file: &Path,
    output: &Path,
    options: &ParseOptions,
    formatter: &OutputFormatter,
) -> CliResult<()> {
    let tag = read_tag_from_path(file, options)
        .with_context(|| format!("reading {}", file.display()))?
        .with_context(|| format!("{} has no ID3v2 tag", file.display()))?;
    let Some(picture) = tag.record().artwork else {
        bail!("{} has no attached picture", file.display());
    };

    fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("cover");
    let target = output.join(format!("{}.{}", stem, picture.extension()));
    fs::write(&target, &picture.data).with_context(|| format!("writing {}", target.display()))?;

    formatter.print_success(&format!(
        "Wrote {} ({}, {} bytes)",
        target.display(),
        picture.mime_type,
        picture.data.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::OutputFormat;

    #[test]
    fn glob_for_plain_names_is_recursive() {
        assert_eq!(batch_glob(Path::new("music"), "*.mp3"), "music/*.mp3");
        assert_eq!(batch_glob(Path::new("music"), "song.mp3"), "music/**/song.mp3");
    }

    fn picture(data: Vec<u8>) -> Picture {
        Picture {
            mime_type: "image/png".to_string(),
            picture_type: 3,
            description: String::new(),
            data,
        }
    }

    #[test]
    fn picture_data_is_elided() {
        let cover = picture(vec![1, 2, 3, 4, 5]);
        let mut value = json!({ "artwork": cover.clone() });
        elide_picture_data(&mut value, "/artwork/data", Some(&cover));
        assert_eq!(value["artwork"]["data"], "<5 bytes>");
        assert_eq!(value["artwork"]["mime_type"], "image/png");

        let mut untouched = json!({ "title": "x" });
        elide_picture_data(&mut untouched, "/artwork/data", Some(&cover));
        assert_eq!(untouched, json!({ "title": "x" }));
    }

    #[test]
    fn empty_picture_is_elided_as_zero_bytes() {
        let empty = picture(Vec::new());
        let mut value = json!({ "artwork": empty.clone() });
        elide_picture_data(&mut value, "/artwork/data", Some(&empty));
        assert_eq!(value["artwork"]["data"], "<0 bytes>");
    }

    #[test]
    fn detect_reports_version_and_size() {
        let header = TagHeader {
            version: (3, 0),
            flags: 0,
            tag_size: 4096,
        };
        let value = detect_value(Path::new("song.mp3"), &header);
        assert_eq!(
            value,
            json!({ "file": "song.mp3", "version": "ID3v2.3", "tag_size": 4096 })
        );

        let formatter = OutputFormatter::new(OutputFormat::KeyValue, true);
        let mut out = Vec::new();
        formatter.output_metadata(&value, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "file: song.mp3\ntag_size: 4096\nversion: ID3v2.3\n\n"
        );
    }
}
