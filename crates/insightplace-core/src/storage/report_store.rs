//! On-disk layout of uploaded report files.
//!
//! Files live under `{root}/{company}/{title}/`, both components sanitised.
//! Paths handed back to callers are relative to `root` and `/`-separated.

use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::StorageError;
use super::filenames::{ALLOWED_FILE_TYPES, file_extension, is_allowed_file_type, sanitize_filename};
use crate::domain::normalize_relative;

/// One file received in an upload request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Result of storing an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredFiles {
    /// First HTML file, else the first file, else empty.
    pub main_file: String,
    pub supporting_files: Vec<String>,
    /// Sum of the uploaded byte counts (archives count compressed).
    pub total_bytes: u64,
}

impl StoredFiles {
    pub fn file_count(&self) -> usize {
        usize::from(!self.main_file.is_empty()) + self.supporting_files.len()
    }

    fn from_ordered(files: Vec<String>, total_bytes: u64) -> Self {
        let main_index = files
            .iter()
            .position(|f| file_extension(f) == "html")
            .or(if files.is_empty() { None } else { Some(0) });

        let mut supporting_files = files;
        let main_file = main_index
            .map(|i| supporting_files.remove(i))
            .unwrap_or_default();

        Self {
            main_file,
            supporting_files,
            total_bytes,
        }
    }
}

/// Filesystem store for report files.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload root if it is missing.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write an upload to disk, extracting zip archives in place.
    ///
    /// Every filename is checked against [`ALLOWED_FILE_TYPES`] before anything
    /// is written. Files with an empty name are skipped; when all of them are,
    /// the result has an empty `main_file`.
    pub async fn store(
        &self,
        company_name: &str,
        title: &str,
        files: Vec<UploadedFile>,
    ) -> Result<StoredFiles, StorageError> {
        if files.is_empty() {
            return Err(StorageError::NoFiles);
        }
        let files: Vec<UploadedFile> = files
            .into_iter()
            .filter(|f| !f.filename.is_empty())
            .collect();
        if files.is_empty() {
            return Ok(StoredFiles::default());
        }
        if let Some(bad) = files
            .iter()
            .find(|f| !is_allowed_file_type(&f.filename, ALLOWED_FILE_TYPES))
        {
            return Err(StorageError::DisallowedFileType(file_extension(&bad.filename)));
        }

        let prefix = format!("{}/{}", sanitize_filename(company_name), sanitize_filename(title));
        let dir = self.root.join(sanitize_filename(company_name)).join(sanitize_filename(title));
        tokio::fs::create_dir_all(&dir).await?;

        let mut ordered: Vec<String> = Vec::new();
        let mut total_bytes = 0u64;

        for upload in files {
            let name = sanitize_filename(&upload.filename);
            let dest = dir.join(&name);
            total_bytes += upload.bytes.len() as u64;
            tokio::fs::write(&dest, &upload.bytes).await?;

            if file_extension(&name) == "zip" {
                match extract_zip_blocking(dest.clone(), dir.clone()).await {
                    Ok(entries) => {
                        tracing::debug!(archive = %name, entries = entries.len(), "Extracted archive");
                        if let Err(e) = tokio::fs::remove_file(&dest).await {
                            tracing::warn!(archive = %dest.display(), error = %e, "Failed to remove archive after extraction");
                        }
                        for entry in entries {
                            push_unique(&mut ordered, format!("{prefix}/{entry}"));
                        }
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(archive = %name, error = %e, "Archive extraction failed; keeping archive");
                    }
                }
            }
            push_unique(&mut ordered, format!("{prefix}/{name}"));
        }

        Ok(StoredFiles::from_ordered(ordered, total_bytes))
    }

    /// Map a stored relative path to an absolute one under the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let normalized = normalize_relative(relative)
            .ok_or_else(|| StorageError::InvalidPath(relative.to_string()))?;
        Ok(normalized
            .split('/')
            .fold(self.root.clone(), |acc, part| acc.join(part)))
    }

    pub async fn exists(&self, relative: &str) -> bool {
        match self.resolve(relative) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Delete report files. Missing files are ignored. Returns how many were removed.
    pub async fn remove_files<'a, I>(&self, files: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut removed = 0;
        let mut parents: Vec<PathBuf> = Vec::new();
        for relative in files {
            let path = self.resolve(relative)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            if let Some(parent) = path.parent().map(Path::to_path_buf) {
                if !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
        }
        // Deepest directories first so nested extraction folders collapse.
        parents.sort_by_key(|p| std::cmp::Reverse(p.components().count()));
        for dir in parents {
            prune_empty_dirs(&self.root, &dir).await;
        }
        Ok(removed)
    }
}

fn push_unique(list: &mut Vec<String>, path: String) {
    if !list.contains(&path) {
        list.push(path);
    }
}

/// Remove `dir` and its empty ancestors, stopping at `root`.
async fn prune_empty_dirs(root: &Path, dir: &Path) {
    let mut current = Some(dir.to_path_buf());
    while let Some(path) = current {
        if path == root || !path.starts_with(root) {
            break;
        }
        // Fails on non-empty directories, which ends the walk.
        if tokio::fs::remove_dir(&path).await.is_err() {
            break;
        }
        current = path.parent().map(Path::to_path_buf);
    }
}

async fn extract_zip_blocking(archive: PathBuf, dest: PathBuf) -> Result<Vec<String>, StorageError> {
    tokio::task::spawn_blocking(move || extract_zip(&archive, &dest))
        .await
        .map_err(|e| StorageError::Archive(format!("extraction task failed: {e}")))?
}

/// Extract regular files of `archive` into `dest`.
///
/// Returns the extracted paths relative to `dest`, in archive order. Entries
/// whose names would leave `dest` are skipped.
fn extract_zip(archive: &Path, dest: &Path) -> Result<Vec<String>, StorageError> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| StorageError::Archive(e.to_string()))?;
    let mut extracted = Vec::new();

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| StorageError::Archive(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(entry = %entry.name(), "Skipping archive entry with unsafe path");
            continue;
        };
        let Some(key) = to_slash_path(&relative) else {
            continue;
        };

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        extracted.push(key);
    }

    Ok(extracted)
}

fn to_slash_path(path: &Path) -> Option<String> {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
