//! Helpers shared by the command-line tool's reporting.

use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress spinner with consistent styling
///
/// # Arguments
/// * `message` - Initial message to display
///
/// # Returns
/// * Configured `ProgressBar` instance, hidden when `hidden` is set
pub fn create_progress_spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size reduction as a percentage; positive means the file shrank
pub fn calculate_size_reduction(original_size: u64, optimized_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - optimized_size as f64) / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_calculate_size_reduction() {
        assert_eq!(calculate_size_reduction(1000, 800), 20.0);
        assert_eq!(calculate_size_reduction(1000, 1200), -20.0);
        assert_eq!(calculate_size_reduction(1000, 1000), 0.0);
        assert_eq!(calculate_size_reduction(0, 500), 0.0);
    }

    #[test]
    fn test_hidden_spinner() {
        let pb = create_progress_spinner("Optimizing...", true);
        assert!(pb.is_hidden());
        pb.finish_and_clear();
    }
}
