use async_trait::async_trait;
use imageoptim_client::{OutgoingRequest, Transport, TransportError, TransportResponse};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn create_test_file(temp_dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = temp_dir.join(name);
    File::create(&path).unwrap().write_all(contents).unwrap();
    path
}

/// Records every request and answers with a canned response or error
pub struct RecordingTransport {
    reply: Result<TransportResponse, String>,
    pub requests: Mutex<Vec<OutgoingRequest>>,
}

impl RecordingTransport {
    pub fn replying(response: TransportResponse) -> Self {
        Self {
            reply: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<OutgoingRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(TransportError::Connection)
    }
}
