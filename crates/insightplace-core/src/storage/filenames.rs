//! Filename helpers shared by upload handling and responses.

/// Extensions accepted for report uploads.
pub const ALLOWED_FILE_TYPES: &[&str] = &[
    "html", "pdf", "png", "jpg", "jpeg", "gif", "csv", "xlsx", "docx", "zip",
];

const UNSAFE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a single path component safe for the filesystem.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() {
        "unnamed_file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lowercased text after the last dot, or the whole name when there is none.
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase()
}

pub fn is_allowed_file_type(name: &str, allowed: &[&str]) -> bool {
    let ext = file_extension(name);
    allowed.iter().any(|a| *a == ext)
}

/// Human-readable size, e.g. `1.5 KB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
