pub mod cli;
pub mod client;
pub mod constants;
pub mod error;
pub mod logger;
pub mod options;
pub mod output;
pub mod params;
pub mod result;
pub mod transport;
pub mod utils;

pub use client::{Client, ImageSource};
pub use error::{ErrorKind, ImageOptimError, Result};
pub use options::{CropType, Format, HighDpi, OptimizationOptions, Quality};
pub use params::{encode_parameters, prepare_parameters, validate_options};
pub use result::{OptimizationResult, Status};
pub use transport::{
    FilePart, OutgoingRequest, ReqwestTransport, RequestBody, Transport, TransportError,
    TransportResponse,
};
