//! Report file storage on the local filesystem.

mod filenames;
mod report_store;

use thiserror::Error;

pub use filenames::{
    ALLOWED_FILE_TYPES, file_extension, format_file_size, is_allowed_file_type, sanitize_filename,
};
pub use report_store::{ReportStore, StoredFiles, UploadedFile};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File type .{0} not allowed")]
    DisallowedFileType(String),

    #[error("Path outside upload directory: {0}")]
    InvalidPath(String),

    #[error("No files were uploaded")]
    NoFiles,

    #[error("Archive error: {0}")]
    Archive(String),
}
