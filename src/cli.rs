use crate::client::ImageSource;
use crate::constants::{
    BASE_URL_ENV_VAR, DEFAULT_BASE_ADDRESS, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS,
    USERNAME_ENV_VAR,
};
use crate::error::{ImageOptimError, Result};
use crate::options::{CropType, Format, HighDpi, OptimizationOptions, Quality};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "imageoptim",
    about = "Optimize, resize and convert images with the ImageOptim web API",
    long_about = "imageoptim sends a local image or an image URL to the ImageOptim API \
                  (https://imageoptim.com/api) and saves the optimized result. \
                  Resizing, cropping, format conversion and quality are all handled by the service.",
    version,
    after_help = "EXAMPLES:\n  \
    imageoptim -u myname -i photo.jpg\n  \
    imageoptim -i https://example.com/banner.png -w 1200 -H 400 --crop --crop-type top\n  \
    imageoptim -i logo.png -f webm --quality high -o ./out\n  \
    imageoptim -i photo.jpg --test -d"
)]
pub struct Args {
    #[arg(
        short = 'i',
        long,
        help = "Image to optimize: a local path or an http(s) URL",
        long_help = "Image to optimize. Inputs starting with http:// or https:// are sent \
                     to the service as a URL; anything else is read from disk and uploaded."
    )]
    pub image: String,

    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT_PATH,
        help = "Directory the optimized file is written to"
    )]
    pub output_path: PathBuf,

    #[arg(
        short = 'u',
        long,
        env = USERNAME_ENV_VAR,
        help = "Your ImageOptim API username",
        long_help = "Your username as given to you by the ImageOptim API. \
                     Can also be set in the IMAGEOPTIMAPI_USERNAME environment variable."
    )]
    pub username: Option<String>,

    #[arg(
        short = 'w',
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum image width in CSS pixels",
        long_help = "Maximum image width. If no height is given, the height follows \
                     the image's aspect ratio."
    )]
    pub width: Option<u32>,

    #[arg(
        short = 'H',
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum image height in CSS pixels (requires --width)"
    )]
    pub height: Option<u32>,

    #[arg(
        long,
        default_value = "1x",
        help = "Multiply dimensions for high-DPI displays (1x, 2x, 3x)"
    )]
    pub high_dpi: HighDpi,

    #[arg(
        long,
        help = "Fit within the dimensions without cropping",
        long_help = "Image is resized to completely fit within the given dimensions without \
                     cropping. Aspect ratio is preserved."
    )]
    pub fit: bool,

    #[arg(
        long,
        help = "Scale and crop to exactly fill the dimensions"
    )]
    pub crop: bool,

    #[arg(
        long,
        default_value = "default",
        help = "Side to favor when cropping (auto, top, left, right, bottom)"
    )]
    pub crop_type: CropType,

    #[arg(long, help = "Horizontal crop focal point, as a percentage")]
    pub crop_x_focal_point: Option<u32>,

    #[arg(
        long,
        help = "Vertical crop focal point, as a percentage (requires --crop-x-focal-point)"
    )]
    pub crop_y_focal_point: Option<u32>,

    #[arg(long, help = "Remove a solid-color border from the image")]
    pub trim_border: bool,

    #[arg(
        long,
        help = "Background color as 3 or 6 hex digits without #, e.g. FFAAF8"
    )]
    pub bg_color: Option<String>,

    #[arg(
        long,
        default_value = "medium",
        help = "Quality for lossy formats (low, medium, high, lossless)"
    )]
    pub quality: Quality,

    #[arg(
        short = 'f',
        long,
        default_value = "auto",
        help = "Output format (auto, png, jpeg, webm, h264)"
    )]
    pub format: Format,

    #[arg(
        short = 't',
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Maximum time for the optimization, in seconds"
    )]
    pub timeout: u64,

    #[arg(long, help = "Go through everything but skip the web call")]
    pub test: bool,

    #[arg(short = 'd', long, help = "Print debug information about the process")]
    pub debug: bool,

    #[arg(short = 'q', long, help = "Only print warnings and errors")]
    pub quiet: bool,

    #[arg(
        long,
        env = BASE_URL_ENV_VAR,
        default_value = DEFAULT_BASE_ADDRESS,
        hide = true
    )]
    pub base_url: String,
}

impl Args {
    /// Builds the per-call options, failing when no username was given
    pub fn to_options(&self) -> Result<OptimizationOptions> {
        let username = self
            .username
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or(ImageOptimError::MissingUsername)?;

        Ok(OptimizationOptions {
            username,
            width: self.width,
            height: self.height,
            high_dpi: self.high_dpi,
            fit: self.fit,
            crop: self.crop,
            crop_type: self.crop_type,
            crop_x_focal_point: self.crop_x_focal_point,
            crop_y_focal_point: self.crop_y_focal_point,
            trim_border: self.trim_border,
            bg_color: self.bg_color.clone(),
            quality: self.quality,
            format: self.format,
        })
    }

    pub fn source(&self) -> ImageSource {
        ImageSource::parse(&self.image)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_argument_set() {
        let args = Args::try_parse_from([
            "imageoptim",
            "-i",
            "photo.jpg",
            "-u",
            "bob",
            "-w",
            "100",
            "-H",
            "50",
            "--high-dpi",
            "2x",
            "--crop",
            "--crop-type",
            "top",
            "--quality",
            "high",
            "-f",
            "png",
            "-t",
            "45",
        ])
        .unwrap();

        let options = args.to_options().unwrap();
        assert_eq!(options.username, "bob");
        assert_eq!(options.width, Some(100));
        assert_eq!(options.height, Some(50));
        assert_eq!(options.high_dpi, HighDpi::X2);
        assert!(options.crop);
        assert_eq!(options.crop_type, CropType::Top);
        assert_eq!(options.quality, Quality::High);
        assert_eq!(options.format, Format::Png);
        assert_eq!(args.timeout(), Duration::from_secs(45));
        assert_eq!(args.output_path, PathBuf::from("optimized"));
        assert_eq!(args.source(), ImageSource::File(PathBuf::from("photo.jpg")));
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["imageoptim", "-i", "https://example.com/a.png", "-u", "bob"])
            .unwrap();
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert_eq!(args.high_dpi, HighDpi::X1);
        assert_eq!(args.format, Format::Auto);
        assert!(!args.test);
        assert!(matches!(args.source(), ImageSource::Url(_)));
    }

    #[test]
    fn test_invalid_enum_value_rejected() {
        let result = Args::try_parse_from(["imageoptim", "-i", "a.png", "--quality", "ultra"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_values_rejected() {
        for args in [
            ["imageoptim", "-i", "a.png", "-w", "0"],
            ["imageoptim", "-i", "a.png", "-H", "0"],
            ["imageoptim", "-i", "a.png", "-t", "0"],
        ] {
            assert!(Args::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn test_empty_username_is_missing() {
        let args = Args::try_parse_from(["imageoptim", "-i", "a.png", "-u", ""]).unwrap();
        assert!(matches!(
            args.to_options(),
            Err(ImageOptimError::MissingUsername)
        ));
    }
}
