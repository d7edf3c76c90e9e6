use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use nytimes_source::config::{DEFAULT_API_RESPONSE_FILE, DEFAULT_REFERENCE_DATA_FILE};
use nytimes_source::io::{excel_write, json_write};
use nytimes_source::{LoadError, LoaderConfig, NyTimesSource, Record, Result};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "NYTIMES_SOURCE_LOG";
const DEMO_BATCH_SIZE: usize = 2;

fn main() {
    let cli = Cli::parse();
    let code = exit_code(init_logging().and_then(|()| run(cli)));
    if code != 0 {
        std::process::exit(code);
    }
}

/// Reports a failed run on stderr and maps it to the process exit code.
fn exit_code(outcome: Result<()>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoadError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.loader_config()?;
    let mut source = NyTimesSource::new(config);
    source.connect(None, None);

    let outcome = match cli.command {
        None => print_demo(&mut source, DEMO_BATCH_SIZE),
        Some(Command::Schema) => print_schema(&mut source),
        Some(Command::Batches(args)) => print_demo(&mut source, args.batch_size()),
        Some(Command::Export(args)) => export(&mut source, &args),
    };

    source.disconnect();
    outcome
}

fn print_schema(source: &mut NyTimesSource) -> Result<()> {
    for field in source.schema()? {
        println!("{field}");
    }
    Ok(())
}

fn print_demo(source: &mut NyTimesSource, batch_size: usize) -> Result<()> {
    let dataset = source.dataset()?;
    let batches = dataset.batches(batch_size)?;
    println!("{:?}", dataset.schema);
    for (idx, batch) in batches.enumerate() {
        println!("{idx} Batch of {} items", batch.len());
        for item in batch {
            println!("{} - {}", field(item, "_id"), field(item, "headline.main"));
            println!(" --> {} - {}", field(item, "status"), field(item, "date_completed"));
        }
    }
    Ok(())
}

fn export(source: &mut NyTimesSource, args: &ExportArgs) -> Result<()> {
    let format = args
        .format
        .unwrap_or_else(|| ExportFormat::from_path(&args.output));
    let dataset = source.dataset()?;
    match format {
        ExportFormat::Json => json_write::write_dataset(&args.output, dataset)?,
        ExportFormat::Xlsx => excel_write::write_dataset(&args.output, dataset)?,
    }
    info!(
        output = %args.output.display(),
        record_count = dataset.len(),
        "exported dataset"
    );
    Ok(())
}

fn field(record: &Record, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge a NY Times article search response with editorial reference data."
)]
struct Cli {
    /// JSON file holding the captured API response.
    #[arg(long, global = true, default_value = DEFAULT_API_RESPONSE_FILE)]
    api_response_file: PathBuf,

    /// Workbook holding the review_status and date_completed sheets.
    #[arg(long, global = true, default_value = DEFAULT_REFERENCE_DATA_FILE)]
    reference_data_file: PathBuf,

    /// JSON loader configuration; overrides the two path options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn loader_config(&self) -> Result<LoaderConfig> {
        match &self.config {
            Some(path) => LoaderConfig::from_json_file(path),
            None => Ok(LoaderConfig::new(
                self.api_response_file.clone(),
                self.reference_data_file.clone(),
            )),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the field names of the merged records.
    Schema,
    /// Print the merged records batch by batch.
    Batches(BatchesArgs),
    /// Write the merged records to a JSON or xlsx file.
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct BatchesArgs {
    /// Maximum number of records per batch.
    #[arg(
        long,
        default_value_t = DEMO_BATCH_SIZE as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    size: u64,
}

impl BatchesArgs {
    fn batch_size(&self) -> usize {
        usize::try_from(self.size).unwrap_or(usize::MAX)
    }
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Output file path.
    #[arg(long)]
    output: PathBuf,

    /// Output format; guessed from the output extension when omitted.
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Xlsx,
}

impl ExportFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => ExportFormat::Xlsx,
            _ => ExportFormat::Json,
        }
    }
}
