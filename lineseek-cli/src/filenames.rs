//! Validation of user-supplied output filenames.

/// Returns true if `name` is acceptable as a result or log filename.
///
/// Only alphanumerics, underscore, hyphen, dot, and space are allowed; in
/// particular path separators are rejected, so output files always land in
/// the working directory.
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
}
