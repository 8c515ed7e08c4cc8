//! Byte size formatting.
//!
//! Sizes are printed either as raw byte counts, which scripts can parse, or
//! with decimal units (kB, MB) for people.

use humansize::{DECIMAL, format_size as format_size_human};

#[cfg(test)]
mod tests;

/// Formats a byte count, with decimal units when `humanize` is set.
///
/// # Examples
///
/// ```
/// use libnexus::format::format_size;
///
/// assert_eq!(format_size(5_000_000, true), "5 MB");
/// assert_eq!(format_size(5_000_000, false), "5000000");
/// ```
pub fn format_size(size_bytes: u64, humanize: bool) -> String {
    if humanize {
        format_size_human(size_bytes, DECIMAL)
    } else {
        size_bytes.to_string()
    }
}
