use crate::constants::{
    content_type_for_filename, DEFAULT_BASE_ADDRESS, DEFAULT_TIMEOUT, DRY_RUN_MESSAGE,
    DRY_RUN_PLACEHOLDER, HTTP_ERROR_PREFIX, MULTIPART_FILE_FIELD,
};
use crate::error::{ImageOptimError, Result};
use crate::options::OptimizationOptions;
use crate::params::prepare_parameters;
use crate::result::{OptimizationResult, Status};
use crate::transport::{
    FilePart, OutgoingRequest, RequestBody, Transport, TransportError, TransportResponse,
};
use percent_encoding::percent_decode_str;
use reqwest::header::{CONTENT_TYPE, SERVER, VIA, WARNING};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// Where the image to optimize comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Fetched by the service itself; appended to the request path
    Url(String),
    /// Read locally and uploaded as multipart form data
    File(PathBuf),
}

impl ImageSource {
    /// Treats anything starting with `http://` or `https://` as a URL, everything else as a path
    pub fn parse(input: &str) -> Self {
        if input.starts_with("https://") || input.starts_with("http://") {
            ImageSource::Url(input.to_string())
        } else {
            ImageSource::File(PathBuf::from(input))
        }
    }

    /// Name of the input image, from the path or the percent-decoded last URL segment
    pub fn file_name(&self) -> Option<String> {
        match self {
            ImageSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            ImageSource::Url(url) => {
                let url = reqwest::Url::parse(url).ok()?;
                let segment = url.path_segments()?.last()?;
                let name = percent_decode_str(segment).decode_utf8_lossy();
                // A decoded separator would escape the output directory
                if name.is_empty() || name.contains(['/', '\\']) {
                    return None;
                }
                Some(name.into_owned())
            }
        }
    }
}

/// Client for the image optimization service.
///
/// Settings fixed at construction apply to every call; per-image settings
/// are passed to [`Client::optimize`].
pub struct Client<T> {
    transport: T,
    base_address: String,
    timeout: Duration,
    dry_run: bool,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            timeout: DEFAULT_TIMEOUT,
            dry_run: false,
        }
    }

    pub fn with_base_address(mut self, base_address: impl Into<String>) -> Self {
        let mut base_address = base_address.into();
        if !base_address.ends_with('/') {
            base_address.push('/');
        }
        self.base_address = base_address;
        self
    }

    /// Timeout encoded into the request; the transport should enforce the same deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip the web call and return a `TestSuccess` result
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Runs one request/response cycle against the service.
    ///
    /// # Returns
    /// * `Ok(OptimizationResult)` whenever a request was attempted (or skipped
    ///   by a dry run); service and transport failures are reported through
    ///   its `status`
    /// * `Err(ImageOptimError)` for invalid options or an unusable local
    ///   input, before any bytes are sent
    pub async fn optimize(
        &self,
        options: &OptimizationOptions,
        source: &ImageSource,
    ) -> Result<OptimizationResult> {
        let started = Instant::now();

        debug!("Preparing parameters");
        let params = prepare_parameters(options, self.timeout)?;

        let (url, upload) = match source {
            ImageSource::Url(image_url) => {
                debug!(image_url = %image_url, "Using image from URL");
                (format!("{}{}{}", self.base_address, params, image_url), None)
            }
            ImageSource::File(path) => {
                let upload = read_upload(path).await?;
                (format!("{}{}", self.base_address, params), Some(upload))
            }
        };
        let original_size = upload.as_ref().map_or(0, |file| file.bytes.len() as u64);

        if self.dry_run {
            debug!("Dry run, skipping web call");
            let mut result = OptimizationResult::new(Status::TestSuccess);
            result.status_message = Some(DRY_RUN_MESSAGE.to_string());
            result.file = upload
                .map(|file| file.bytes)
                .unwrap_or_else(|| DRY_RUN_PLACEHOLDER.to_vec());
            result.original_size = original_size;
            result.elapsed_seconds = started.elapsed().as_secs_f64();
            return Ok(result);
        }

        let request = OutgoingRequest::post(url, upload.map(RequestBody::Multipart));

        debug!(elapsed = started.elapsed().as_secs_f64(), "Making web call");
        let outcome = self.transport.send(request).await;
        debug!(elapsed = started.elapsed().as_secs_f64(), "Back from web call");

        let mut result = match outcome {
            Ok(response) => classify_response(response),
            Err(err) => transport_failure(&err),
        };
        result.original_size = original_size;
        result.elapsed_seconds = started.elapsed().as_secs_f64();

        Ok(result)
    }
}

async fn read_upload(path: &Path) -> Result<FilePart> {
    if !path.is_file() {
        return Err(ImageOptimError::FileNotFound(path.to_path_buf()));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = content_type_for_filename(&file_name)
        .ok_or_else(|| ImageOptimError::UnknownContentType(file_name.clone()))?;

    debug!(path = %path.display(), "Reading file");
    let bytes = tokio::fs::read(path).await?;

    Ok(FilePart {
        field: MULTIPART_FILE_FIELD.to_string(),
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}

fn classify_response(response: TransportResponse) -> OptimizationResult {
    let status = Status::from_status_code(response.status);
    debug!(code = response.status.as_u16(), status = %status, "Classified response");

    let mut result = OptimizationResult::new(status);
    result.server_header = response.first_header(&SERVER);
    result.via_header = response.first_header(&VIA);
    result.warnings = response.all_headers(&WARNING);

    if status == Status::Success {
        result.file_type = response.first_header(&CONTENT_TYPE);
        result.file = response.body;
    } else {
        result.status_message = Some(response.body_text());
    }

    result
}

fn transport_failure(err: &TransportError) -> OptimizationResult {
    debug!(error = %err, "Exception on web call");
    let mut result = OptimizationResult::new(Status::OtherError);
    result.status_message = Some(format!("{} {}", HTTP_ERROR_PREFIX, err));
    result
}
