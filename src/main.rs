use anyhow::{bail, Context, Result};
use clap::Parser;
use imageoptim_client::cli::Args;
use imageoptim_client::constants::{SUCCESS_PREFIX, USERNAME_ENV_VAR};
use imageoptim_client::logger::{set_quiet_mode, set_verbose_mode};
use imageoptim_client::output::{input_file_name, output_file_name, write_output};
use imageoptim_client::utils::{calculate_size_reduction, create_progress_spinner, format_file_size};
use imageoptim_client::{
    error, info, verbose, warn, Client, ImageOptimError, ImageSource, OptimizationResult,
    ReqwestTransport, Status,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.debug);
    set_quiet_mode(args.quiet);
    set_verbose_mode(args.debug);

    run(args).await
}

fn init_tracing(debug: bool) {
    let default_directive = if debug { "imageoptim_client=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let options = match args.to_options() {
        Err(ImageOptimError::MissingUsername) => bail!(
            "You must supply a username through the -u option or in the {} environment variable",
            USERNAME_ENV_VAR
        ),
        other => other?,
    };

    let timeout = args.timeout();
    let transport = ReqwestTransport::new(timeout).context("Failed to build HTTP client")?;
    let client = Client::new(transport)
        .with_base_address(args.base_url.as_str())
        .with_timeout(timeout)
        .with_dry_run(args.test);

    let source = args.source();
    let input_name = input_file_name(&source);
    let output_name = output_file_name(&input_name, options.format);

    info!("🗜️  Optimizing: {}", input_name);
    let pb = create_progress_spinner("Waiting for the service...", args.quiet);
    let outcome = client.optimize(&options, &source).await;
    pb.finish_and_clear();
    let result = outcome.with_context(|| format!("Could not optimize {}", args.image))?;

    print_diagnostics(&result);

    match result.status {
        Status::Success if result.file.is_empty() => bail!("Returned file is empty."),
        Status::Success => {
            print_summary(&result, &source, &input_name, &output_name);
            let path = write_output(&args.output_path, &output_name, &result.file).await?;
            info!("{} Saved to {}", SUCCESS_PREFIX, path.display());
        }
        Status::TestSuccess => {
            info!("Status: {}", result.status);
            if let Some(message) = &result.status_message {
                info!("Status details: {}", message);
            }
        }
        status => {
            error!("Status: {}", status);
            if let Some(details) = &result.status_message {
                error!("Status details: {}", details);
            }
            bail!("Optimization of {} failed with status {}", input_name, status);
        }
    }

    Ok(())
}

fn print_diagnostics(result: &OptimizationResult) {
    if let Some(server) = &result.server_header {
        verbose!("Server header: {}", server);
    }
    if let Some(via) = &result.via_header {
        verbose!("Via header: {}", via);
    }
    if let Some(file_type) = &result.file_type {
        verbose!("File type: {}", file_type);
    }
    verbose!("Status: {}", result.status);
    if let Some(message) = &result.status_message {
        verbose!("Status message: {}", message);
    }

    for warning in &result.warnings {
        warn!("Warning: {}", warning);
    }
}

fn print_summary(
    result: &OptimizationResult,
    source: &ImageSource,
    input_name: &str,
    output_name: &str,
) {
    let optimized_size = result.file.len() as u64;
    match source {
        ImageSource::Url(_) => info!(
            "Optimized {} to {} {} in {:.2}s",
            input_name,
            output_name,
            format_file_size(optimized_size),
            result.elapsed_seconds
        ),
        ImageSource::File(_) => info!(
            "Optimized {} to {} from {} to {} ({:.1}% smaller) in {:.2}s",
            input_name,
            output_name,
            format_file_size(result.original_size),
            format_file_size(optimized_size),
            calculate_size_reduction(result.original_size, optimized_size),
            result.elapsed_seconds
        ),
    }
}
