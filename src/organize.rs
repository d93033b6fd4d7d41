use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder name format for dated subfolders, e.g. "2024-03-01".
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub struct FileMove {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// An entry that could not be handled; the run carries on without it.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct OrganizeReport {
    pub moved: Vec<FileMove>,
    pub failures: Vec<Failure>,
    pub dry_run: bool,
}

/// Splits a file name into stem and extension without the dot.
///
/// Unlike `Path::extension`, a bare `.png` counts as an empty stem with a `png` extension.
fn split_name(name: &OsStr) -> (OsString, Option<OsString>) {
    let path = Path::new(name);
    if let Some(ext) = path.extension() {
        let stem = path.file_stem().unwrap_or_default();
        return (stem.to_os_string(), Some(ext.to_os_string()));
    }

    match name.to_str().and_then(|s| s.strip_prefix('.')) {
        Some(ext) if !ext.is_empty() => (OsString::new(), Some(OsString::from(ext))),
        _ => (name.to_os_string(), None),
    }
}

pub fn is_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    split_name(name)
        .1
        .as_deref()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)))
        .unwrap_or(false)
}

/// Sort every image directly inside `base` into `base/<YYYY-MM-DD>/` by mtime.
///
/// Only failing to list `base` itself is an error. Problems with single files
/// are collected in the report and the pass continues.
pub fn organize_folder(base: &Path, dry_run: bool) -> Result<OrganizeReport> {
    let mut report = OrganizeReport {
        dry_run,
        ..Default::default()
    };

    let entries =
        fs::read_dir(base).with_context(|| format!("read_dir failed: {}", base.display()))?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                report.failures.push(Failure {
                    path: base.to_path_buf(),
                    error: anyhow::Error::new(err).context("Failed to read directory entry"),
                });
                continue;
            }
        };
        let file_path = entry.path();

        match organize_file(base, &file_path, dry_run) {
            Ok(Some(mv)) => report.moved.push(mv),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(path = %file_path.display(), "skipping file: {error:#}");
                report.failures.push(Failure {
                    path: file_path,
                    error,
                });
            }
        }
    }

    Ok(report)
}

/// Moves one entry into its dated folder. `Ok(None)` means it was not an image file.
fn organize_file(base: &Path, file_path: &Path, dry_run: bool) -> Result<Option<FileMove>> {
    if !is_image(file_path) {
        return Ok(None);
    }

    let meta = fs::metadata(file_path)
        .with_context(|| format!("Cannot stat: {}", file_path.display()))?;
    if !meta.is_file() {
        return Ok(None);
    }

    let modified: DateTime<Local> = meta
        .modified()
        .with_context(|| format!("No modification time: {}", file_path.display()))?
        .into();
    let target_dir = base.join(modified.format(DATE_FORMAT).to_string());

    let Some(file_name) = file_path.file_name() else {
        return Ok(None);
    };
    let to = safe_destination(&target_dir, file_name);

    if !dry_run {
        fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create dir: {}", target_dir.display()))?;

        // rename only; moving across filesystems is not attempted
        fs::rename(file_path, &to).with_context(|| {
            format!(
                "Failed to move '{}' -> '{}'",
                file_path.display(),
                to.display()
            )
        })?;
    }

    tracing::debug!(from = %file_path.display(), to = %to.display(), dry_run, "moved");

    Ok(Some(FileMove {
        from: file_path.to_path_buf(),
        to,
    }))
}

/// A path in `dir` for `file_name` that does not overwrite anything.
///
/// `photo.png` becomes `photo_1.png`, `photo_2.png`, ... until a free name is found.
pub fn safe_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let target = dir.join(file_name);
    if !target.exists() {
        return target;
    }

    let (stem, ext) = split_name(file_name);

    let mut i = 1;
    loop {
        let mut name = stem.clone();
        name.push(format!("_{i}"));
        if let Some(ext) = &ext {
            name.push(".");
            name.push(ext);
        }

        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

pub fn print_organize_report(report: &OrganizeReport) {
    for (idx, mv) in report.moved.iter().enumerate() {
        println!(
            "  {:>2}. '{}' -> '{}'",
            idx + 1,
            mv.from.display(),
            mv.to.display()
        );
    }

    if report.dry_run {
        println!("Would move {} image(s).", report.moved.len());
    } else {
        println!("Moved {} image(s).", report.moved.len());
    }

    if !report.failures.is_empty() {
        println!("Skipped {} entries due to errors:", report.failures.len());
        for f in &report.failures {
            println!("  - {}: {:#}", f.path.display(), f.error);
        }
    }
}
