use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ocrlines::config::{load_config, save_config, AppConfig};
use ocrlines::pipeline::{build_lines, export_lines, ExportFormat, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "ocrlines")]
#[command(version, about = "Reconstruct text lines from fragmented OCR annotations", long_about = None)]
struct Cli {
    /// Log merge rounds
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the annotations of a text-detection response into lines
    Merge {
        /// Response JSON file
        input: PathBuf,

        /// Output directory (default: ./<input_name>_lines)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format(s) to generate
        #[arg(short, long, value_enum, default_values_t = vec![Format::Json])]
        format: Vec<Format>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Which entry of a batch response to read
        #[arg(long, default_value_t = 0)]
        response_index: usize,

        /// Also group lines into blocks by centroid density
        #[arg(long)]
        cluster: bool,
    },

    /// Print the default configuration, or write it to a file
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    Json,
    Text,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ExportFormat::Json,
            Format::Text => ExportFormat::Text,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Merge {
            input,
            output,
            format,
            config,
            response_index,
            cluster,
        } => merge(input, output, format, config, response_index, cluster),
        Commands::Config { output } => write_default_config(output),
    }
}

fn merge(
    input: PathBuf,
    output: Option<PathBuf>,
    formats: Vec<Format>,
    config: Option<PathBuf>,
    response_index: usize,
    cluster: bool,
) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let app = match &config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::default(),
    };

    let output_dir = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ocr".to_string());
        PathBuf::from(format!("{stem}_lines"))
    });

    info!(input = %input.display(), output = %output_dir.display(), "processing");

    let mut pipeline = PipelineConfig::new(input.clone(), output_dir.clone(), app);
    pipeline.response_index = response_index;
    pipeline.cluster = cluster;

    let result = build_lines(&pipeline)?;
    let formats: Vec<ExportFormat> = formats.into_iter().map(ExportFormat::from).collect();
    export_lines(&result, &pipeline.output, &formats)
        .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;

    info!(
        lines = result.lines.len(),
        merges = result.report.total_merges(),
        "done"
    );
    Ok(())
}

fn write_default_config(output: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::default();
    match output {
        Some(path) => save_config(&config, &path)
            .with_context(|| format!("Failed to write config: {}", path.display()))?,
        None => print!("{}", toml::to_string_pretty(&config)?),
    }
    Ok(())
}
