//! Encodes optimization options into the service's request path segment.
//!
//! The path has the shape `username/opt,opt,.../`. Options are only emitted
//! when they differ from the service default, and always in the same order.

use crate::constants::DEFAULT_TIMEOUT;
use crate::error::{ImageOptimError, Result};
use crate::options::{Format, OptimizationOptions, Quality};
use std::time::Duration;

/// Checks the options for combinations the service cannot interpret.
///
/// # Returns
/// * `Ok(())` if the options can be encoded
/// * `Err(ImageOptimError)` naming the first rule that was broken
pub fn validate_options(options: &OptimizationOptions) -> Result<()> {
    if options.username.is_empty() {
        return Err(ImageOptimError::MissingUsername);
    }

    if options.height.is_some() && options.width.is_none() {
        return Err(ImageOptimError::HeightWithoutWidth);
    }

    if options.width == Some(0) {
        return Err(ImageOptimError::ZeroDimension("width"));
    }
    if options.height == Some(0) {
        return Err(ImageOptimError::ZeroDimension("height"));
    }

    if options.crop_y_focal_point.is_some() && options.crop_x_focal_point.is_none() {
        return Err(ImageOptimError::CropYWithoutX);
    }

    if let Some(bg_color) = options.bg_color.as_deref().filter(|c| !c.is_empty()) {
        if bg_color.starts_with('#') {
            return Err(ImageOptimError::BgColorHash(bg_color.to_string()));
        }
        let digits = bg_color.chars().count();
        if digits != 3 && digits != 6 {
            return Err(ImageOptimError::BgColorLength(bg_color.to_string()));
        }
    }

    Ok(())
}

/// Builds the request path for already validated options.
///
/// `timeout` is only encoded when it is not the 30 second default.
pub fn encode_parameters(options: &OptimizationOptions, timeout: Duration) -> String {
    let mut segments: Vec<String> = Vec::new();

    match (options.width, options.height) {
        (Some(width), Some(height)) => segments.push(format!("{}x{}", width, height)),
        (Some(width), None) => segments.push(width.to_string()),
        (None, _) => segments.push("full".to_string()),
    }

    if let Some(dpi) = options.high_dpi.keyword() {
        segments.push(dpi.to_string());
    }

    if options.fit {
        segments.push("fit".to_string());
    }

    if options.crop {
        match (options.crop_x_focal_point, options.crop_y_focal_point) {
            (Some(x), Some(y)) => segments.push(format!("crop={}x{}", x, y)),
            _ => segments.push(options.crop_type.keyword().to_string()),
        }
    }

    if options.trim_border {
        segments.push("trim=border".to_string());
    }

    if let Some(bg_color) = options.bg_color.as_deref().filter(|c| !c.is_empty()) {
        segments.push(bg_color.to_string());
    }

    if options.quality != Quality::Medium {
        segments.push(options.quality.keyword().to_string());
    }

    if options.format != Format::Auto {
        segments.push(options.format.keyword().to_string());
    }

    if timeout != DEFAULT_TIMEOUT {
        segments.push(format!("timeout={}", timeout.as_secs_f64()));
    }

    format!("{}/{}/", options.username, segments.join(","))
}

/// Validates the options and the timeout, then encodes them
pub fn prepare_parameters(options: &OptimizationOptions, timeout: Duration) -> Result<String> {
    validate_options(options)?;
    if timeout.is_zero() {
        return Err(ImageOptimError::ZeroTimeout);
    }
    Ok(encode_parameters(options, timeout))
}
