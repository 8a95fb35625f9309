use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use column_analyzer::data::filter::numeric_columns;
use column_analyzer::report::{self, Report};
use column_analyzer::{AnalyzerConfig, Delimiter, Ingester, MovingAverage, Session};

#[derive(Parser)]
#[command(
    name = "column-analyzer",
    about = "Descriptive statistics and moving averages for a column of a delimited text file"
)]
struct Cli {
    /// Delimited text file (CSV, TSV, semicolon or pipe separated)
    file: PathBuf,

    /// Column to analyze. Defaults to the first column with numeric data.
    #[arg(short, long)]
    column: Option<String>,

    /// The first line holds data, not column names
    #[arg(long)]
    no_header: bool,

    /// Field delimiter (, ; | tab). Detected from the first line when omitted.
    #[arg(short, long)]
    delimiter: Option<Delimiter>,

    /// Window for the simple and weighted moving averages
    #[arg(short, long)]
    window: Option<usize>,

    /// EMA smoothing factor in [0, 1]
    #[arg(long)]
    alpha: Option<f64>,

    /// Moving average compared against the data
    #[arg(long, value_enum, default_value_t = MaKind::FourPoint)]
    ma: MaKind,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the moving-average comparison table as CSV
    #[arg(long)]
    ma_csv: Option<PathBuf>,

    /// List columns with numeric data and exit
    #[arg(long)]
    list_columns: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum MaKind {
    Simple,
    FourPoint,
    Exponential,
    Weighted,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::from_path(path)?,
        None => AnalyzerConfig::default(),
    };
    if cli.no_header {
        config.has_header = false;
    }
    if cli.delimiter.is_some() {
        config.delimiter = cli.delimiter;
    }
    if let Some(window) = cli.window {
        config.window = window;
    }
    if let Some(alpha) = cli.alpha {
        config.ema_alpha = alpha;
    }

    // Ingestion runs off the main thread; the core itself is synchronous.
    let path = cli.file.clone();
    let options = config.ingest_options();
    let (dataset, last_error) = thread::spawn(move || {
        let mut ingester = Ingester::new(options);
        let dataset = ingester.load_file(&path);
        (dataset, ingester.last_error().map(str::to_string))
    })
    .join()
    .map_err(|_| anyhow!("ingestion worker panicked"))?;

    if let Some(err) = last_error {
        bail!("{}: {err}", cli.file.display());
    }

    let source = dataset.source().unwrap_or_default().to_string();
    let counts = dataset.counts();

    if cli.list_columns {
        let mut stdout = io::stdout().lock();
        for name in numeric_columns(&dataset, 1) {
            writeln!(stdout, "{name}\t{}", dataset.record_count(name))?;
        }
        return Ok(());
    }

    let mut session = Session::default();
    session.set_dataset(dataset);
    info!("{}", session.status_message);
    if session.dataset.is_none() {
        bail!("{}", session.status_message);
    }
    if let Some(column) = &cli.column {
        session.select_column(column);
    }
    let (Some(column), Some(stats)) = (session.selected_column.as_deref(), session.stats.as_ref())
    else {
        bail!("{}", session.status_message);
    };

    let mut doc = Report::new(&source, column, counts, stats);
    doc.z_threshold = config.z_threshold;
    doc.preview_len = config.preview_len;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    match cli.format {
        OutputFormat::Text => report::write_text_report(&doc, out)?,
        OutputFormat::Json => report::write_json_report(&doc, out)?,
    }

    let kind = match cli.ma {
        MaKind::Simple => MovingAverage::Simple {
            window: config.window,
        },
        MaKind::FourPoint => MovingAverage::FourPoint,
        MaKind::Exponential => MovingAverage::Exponential {
            alpha: config.ema_alpha,
        },
        MaKind::Weighted => MovingAverage::Weighted {
            window: config.window,
        },
    };
    let comparison = kind.compare(stats.data());
    info!("{}", report::comparison_summary(&comparison));

    if let Some(path) = &cli.ma_csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_moving_average_csv(&comparison, file)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("moving-average table written to {}", path.display());
    }

    Ok(())
}
