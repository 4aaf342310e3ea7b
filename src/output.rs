use crate::client::ImageSource;
use crate::constants::FALLBACK_INPUT_NAME;
use crate::error::{ImageOptimError, Result};
use crate::options::Format;
use std::path::{Path, PathBuf};

/// Name of the input image, falling back to a generic name when the source has none
pub fn input_file_name(source: &ImageSource) -> String {
    source
        .file_name()
        .unwrap_or_else(|| FALLBACK_INPUT_NAME.to_string())
}

/// File name for the optimized output.
///
/// With no explicit format the input name is kept; otherwise the input stem
/// gets the extension of the requested format.
pub fn output_file_name(input_name: &str, format: Format) -> String {
    match format.extension() {
        None => input_name.to_string(),
        Some(extension) => {
            let stem = Path::new(input_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| input_name.to_string());
            format!("{}.{}", stem, extension)
        }
    }
}

/// Writes the optimized bytes into `output_dir`, creating the directory when needed
pub async fn write_output(output_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    if !output_dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(output_dir).await.map_err(|err| {
            ImageOptimError::Io(std::io::Error::new(
                err.kind(),
                format!("failed to create {}: {}", output_dir.display(), err),
            ))
        })?;
    }

    let output_path = output_dir.join(file_name);
    tokio::fs::write(&output_path, bytes).await?;
    Ok(output_path)
}
