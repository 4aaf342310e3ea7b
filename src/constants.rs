use std::time::Duration;

pub const DEFAULT_BASE_ADDRESS: &str = "https://im2.io/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT_PATH: &str = "optimized";
pub const USERNAME_ENV_VAR: &str = "IMAGEOPTIMAPI_USERNAME";
pub const BASE_URL_ENV_VAR: &str = "IMAGEOPTIMAPI_BASE_URL";

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const MULTIPART_FILE_FIELD: &str = "file";
pub const DRY_RUN_PLACEHOLDER: &[u8] = &[0xFF];
pub const DRY_RUN_MESSAGE: &str = "Test call, file is not an optimized image.";
pub const HTTP_ERROR_PREFIX: &str = "Http request error:";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const FALLBACK_INPUT_NAME: &str = "image";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";

/// Extension to content-type table used for multipart uploads.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("jfif", "image/jpeg"),
    ("pjpeg", "image/jpeg"),
    ("pjp", "image/jpeg"),
    ("png", "image/png"),
    ("apng", "image/apng"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("jxl", "image/jxl"),
    ("jp2", "image/jp2"),
    ("bmp", "image/bmp"),
    ("dib", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("cur", "image/x-icon"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("psd", "image/vnd.adobe.photoshop"),
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("qt", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    ("ogv", "video/ogg"),
    ("mpg", "video/mpeg"),
    ("mpeg", "video/mpeg"),
    ("3gp", "video/3gpp"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
];

/// Looks up the content type for a file name by its extension, ignoring case.
pub fn content_type_for_filename(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_lowercase();
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
}
