use crate::config::{RvlConfig, WordOrder};
use crate::error::{Result, RvlError};
use crate::frame::{decompress_frame, read_shape, DepthFrame, HEADER_LEN};
use crate::pipeline::{self, CompressionStats};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "RVL lossless depth frame codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses raw little-endian u16 frames
    Compress {
        /// Raw frame files to compress
        #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Frame height in pixels
        #[arg(long)]
        height: u16,

        /// Frame width in pixels
        #[arg(long)]
        width: u16,

        /// Output directory (default: next to each input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Word byte order [little, big]
        #[arg(long, default_value = "little")]
        word_order: WordOrder,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Decompresses RVL frames back to raw little-endian u16
    Decompress {
        /// Compressed frame files
        #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Word byte order [little, big]
        #[arg(long, default_value = "little")]
        word_order: WordOrder,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Prints the shape and compression ratio of a compressed frame
    Info {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Word byte order [little, big]
        #[arg(long, default_value = "little")]
        word_order: WordOrder,
    },
}

pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Runs the CLI against an explicit argument list.
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| RvlError::ConfigError(e.to_string()))?;
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compress { input, height, width, output, word_order, threads } => {
            let config = RvlConfig {
                word_order,
                threads: threads.unwrap_or_else(num_cpus::get),
                show_progress: input.len() > 1,
            };

            let frames = input
                .iter()
                .map(|path| {
                    let mut reader = BufReader::new(File::open(path)?);
                    pipeline::read_raw_frame(&mut reader, height, width)
                })
                .collect::<Result<Vec<DepthFrame>>>()?;

            println!("Compressing {} frame(s) of {}x{}...", frames.len(), height, width);
            let start = Instant::now();
            let streams = pipeline::compress_frames(&frames, &config)?;
            let duration = start.elapsed();

            for ((path, frame), stream) in input.iter().zip(&frames).zip(&streams) {
                let dest = output_path(path, output.as_deref(), "rvl");
                write_file(&dest, stream)?;
                let stats = CompressionStats::new((frame.pixel_count() * 2) as u64, stream.len() as u64);
                println!("  {} -> {} ({:.2}x)", path.display(), dest.display(), stats.ratio);
            }
            println!("Compression successful!");
            println!("  Elapsed Time:     {:.2?}", duration);
        }
        Commands::Decompress { input, output, word_order, threads } => {
            let config = RvlConfig {
                word_order,
                threads: threads.unwrap_or_else(num_cpus::get),
                show_progress: input.len() > 1,
            };

            let streams = input.iter().map(fs::read).collect::<std::io::Result<Vec<_>>>()?;

            println!("Decompressing {} frame(s)...", streams.len());
            let start = Instant::now();
            let frames = pipeline::decompress_frames(&streams, &config)?;
            let duration = start.elapsed();

            for (path, frame) in input.iter().zip(&frames) {
                let dest = output_path(path, output.as_deref(), "raw");
                let mut writer = BufWriter::new(File::create(&dest)?);
                pipeline::write_raw_frame(&mut writer, frame)?;
                writer.flush()?;
                println!("  {} -> {} ({}x{})", path.display(), dest.display(), frame.height(), frame.width());
            }
            println!("Decompression successful!");
            println!("  Elapsed Time: {:.2?}", duration);
        }
        Commands::Info { input, word_order } => {
            let bytes = fs::read(&input)?;
            let (height, width) = read_shape(&bytes)?;
            let config = RvlConfig::default().with_word_order(word_order);
            let frame = decompress_frame(&bytes, &config)?;
            let stats = CompressionStats::new((frame.pixel_count() * 2) as u64, bytes.len() as u64);

            println!("{}", input.display());
            println!("  Shape:            {}x{}", height, width);
            println!("  Valid Pixels:     {} / {}", frame.valid_pixels(), frame.pixel_count());
            println!("  Payload Size:     {} bytes", bytes.len() - HEADER_LEN);
            println!("  Original Size:    {} bytes", stats.original_size);
            println!("  Ratio:            {:.2}x", stats.ratio);
        }
    }

    Ok(())
}

fn output_path(input: &Path, dir: Option<&Path>, extension: &str) -> PathBuf {
    let renamed = input.with_extension(extension);
    match (dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
