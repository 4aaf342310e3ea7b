use reqwest::StatusCode;
use std::fmt;

/// Outcome of one optimization call as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    CannotFindImage,
    OptionsOrImageIncorrect,
    OtherError,
    PaymentRequired,
    /// Dry run; the network was never contacted
    TestSuccess,
    UsernameMissingIncorrect,
}

impl Status {
    pub fn from_status_code(code: StatusCode) -> Self {
        if code.is_success() {
            return Status::Success;
        }
        match code {
            StatusCode::BAD_REQUEST => Status::OptionsOrImageIncorrect,
            StatusCode::PAYMENT_REQUIRED => Status::PaymentRequired,
            StatusCode::FORBIDDEN => Status::UsernameMissingIncorrect,
            StatusCode::NOT_FOUND => Status::CannotFindImage,
            _ => Status::OtherError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success | Status::TestSuccess)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Success => "Success",
            Status::CannotFindImage => "CannotFindImage",
            Status::OptionsOrImageIncorrect => "OptionsOrImageIncorrect",
            Status::OtherError => "OtherError",
            Status::PaymentRequired => "PaymentRequired",
            Status::TestSuccess => "TestSuccess",
            Status::UsernameMissingIncorrect => "UsernameMissingIncorrect",
        };
        write!(f, "{}", name)
    }
}

/// Everything learned from one call to the service
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub status: Status,
    pub status_message: Option<String>,
    pub file: Vec<u8>,
    pub file_type: Option<String>,
    /// Size of the local input in bytes, 0 for URL sources
    pub original_size: u64,
    pub elapsed_seconds: f64,
    pub server_header: Option<String>,
    pub via_header: Option<String>,
    pub warnings: Vec<String>,
}

impl OptimizationResult {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            status_message: None,
            file: Vec::new(),
            file_type: None,
            original_size: 0,
            elapsed_seconds: 0.0,
            server_header: None,
            via_header: None,
            warnings: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
