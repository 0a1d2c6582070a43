use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use tinypng_client::cli::{Args, Commands};
use tinypng_client::{
    info, logger, verbose, warn, PreserveMetadata, ResizeMethod, TinyPngClient,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::set_level(args.quiet, args.verbose);

    if let Err(e) = run(args.command).await {
        tinypng_client::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Compress {
            input,
            output,
            api_key,
            preserve,
        } => compress_command(&input, &output, &api_key, &preserve).await,
        Commands::Resize {
            input,
            output,
            api_key,
            width,
            height,
            method,
            preserve,
        } => resize_command(&input, &output, &api_key, width, height, method.as_deref(), &preserve).await,
        Commands::Info { input, api_key } => info_command(&input, &api_key).await,
    }
}

async fn compress_command(
    input: &Path,
    output: &Path,
    api_key: &str,
    preserve: &[String],
) -> anyhow::Result<()> {
    let client = TinyPngClient::new(api_key)?;
    let metadata = parse_preserve(preserve)?;

    let result = compress_with_spinner(&client, input).await?;
    print_compression_summary(&result);

    save_result(&client, &result, metadata, output).await
}

async fn resize_command(
    input: &Path,
    output: &Path,
    api_key: &str,
    width: u32,
    height: u32,
    method: Option<&str>,
    preserve: &[String],
) -> anyhow::Result<()> {
    let client = TinyPngClient::new(api_key)?;
    let metadata = parse_preserve(preserve)?;
    let method = match method {
        Some(name) => name.parse::<ResizeMethod>()?,
        None => ResizeMethod::default(),
    };

    let result = compress_with_spinner(&client, input).await?;
    print_compression_summary(&result);

    let spinner = spinner("Resizing...");
    let resized = client.resize(&result, width, height, method).await;
    spinner.finish_and_clear();
    let resized = resized.context("resize failed")?;

    info!("📐 Resized to: {}x{}", resized.output.width, resized.output.height);

    save_result(&client, &resized, metadata, output).await
}

async fn info_command(input: &Path, api_key: &str) -> anyhow::Result<()> {
    let client = TinyPngClient::new(api_key)?;
    let result = compress_with_spinner(&client, input).await?;

    info!("📋 Compression result for {input:?}");
    print_compression_summary(&result);
    info!("🖼️  Output type: {}", result.output.content_type);
    info!("📐 Dimensions: {}x{}", result.output.width, result.output.height);

    Ok(())
}

async fn compress_with_spinner(
    client: &TinyPngClient,
    input: &Path,
) -> anyhow::Result<tinypng_client::CompressionResult> {
    let spinner = spinner("Compressing...");
    let result = client.compress_file(input).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("compressing {}", input.display()))
}

async fn save_result(
    client: &TinyPngClient,
    result: &tinypng_client::CompressionResult,
    metadata: PreserveMetadata,
    output: &Path,
) -> anyhow::Result<()> {
    if output.exists() {
        warn!("Overwriting existing file: {output:?}");
    }

    let spinner = spinner("Downloading...");
    let response = client.download(result, metadata).await;
    spinner.finish_and_clear();
    let response = response.context("download failed")?;

    verbose!("Response type: {:?}", response.content_type());

    let written = response
        .save_to_file(output)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    info!("✅ Saved {written} bytes to {output:?}");
    Ok(())
}

fn print_compression_summary(result: &tinypng_client::CompressionResult) {
    info!("📊 Original size: {} bytes", result.input.size);
    info!("📈 Compressed size: {} bytes", result.output.size);
    info!("🎯 Compression ratio: {:.2}%", result.output.ratio * 100.0);
}

fn parse_preserve(flags: &[String]) -> anyhow::Result<PreserveMetadata> {
    let mut metadata = PreserveMetadata::NONE;
    for flag in flags {
        metadata |= flag.parse::<PreserveMetadata>()?;
    }
    verbose!("Preserving metadata: {metadata:?}");
    Ok(metadata)
}

fn spinner(message: &'static str) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
