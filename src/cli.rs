use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tinypng-client",
    about = "Compress, resize and download images through the TinyPNG API",
    long_about = "tinypng-client sends images to the TinyPNG compression service and saves the \
                  compressed result locally. It supports resizing on the service side and \
                  preserving selected metadata fields (copyright, creation date, GPS location) \
                  that compression would otherwise strip.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    tinypng-client compress photo.png photo-small.png -k YOUR_KEY\n  \
    tinypng-client resize photo.png thumb.png -k YOUR_KEY -w 320 -H 240 -m cover\n  \
    tinypng-client compress photo.jpg out.jpg -k YOUR_KEY --preserve copyright,creation\n  \
    tinypng-client info photo.png -k YOUR_KEY"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'q', long, global = true, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print extra detail")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress an image and save the result",
        long_about = "Upload an image to the compression service and download the compressed \
                      bytes to the output path. Metadata preservation is negotiated with the \
                      service; creation and location are only available for JPEG output."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output image file path")]
        output: PathBuf,

        #[arg(
            short = 'k',
            long,
            help = "TinyPNG API key (sign up at https://tinypng.com/developers)"
        )]
        api_key: String,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Metadata to preserve (copyright, creation, location)",
            long_help = "Comma-separated metadata fields the service should keep in the output. \
                         copyright works for any image; creation and location require JPEG output."
        )]
        preserve: Vec<String>,
    },

    #[command(
        about = "Compress and resize an image, then save the result",
        long_about = "Upload an image, ask the service to resize the compressed result to the \
                      target geometry, and download the final bytes to the output path."
    )]
    Resize {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output image file path")]
        output: PathBuf,

        #[arg(
            short = 'k',
            long,
            help = "TinyPNG API key (sign up at https://tinypng.com/developers)"
        )]
        api_key: String,

        #[arg(short = 'w', long, help = "Target width in pixels")]
        width: u32,

        #[arg(short = 'H', long, help = "Target height in pixels")]
        height: u32,

        #[arg(
            short = 'm',
            long,
            help = "Resize method (fit, scale, cover, thumb; default: fit)",
            long_help = "How the service fits the image into the target geometry. \
                         fit scales within the bounds, scale ignores aspect ratio, \
                         cover crops to fill, thumb produces an intelligent thumbnail."
        )]
        method: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Metadata to preserve (copyright, creation, location)"
        )]
        preserve: Vec<String>,
    },

    #[command(
        about = "Compress an image and print the result metadata",
        long_about = "Upload an image and print the compression outcome (sizes, type, dimensions, \
                      ratio) without downloading the compressed bytes."
    )]
    Info {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'k',
            long,
            help = "TinyPNG API key (sign up at https://tinypng.com/developers)"
        )]
        api_key: String,
    },
}
