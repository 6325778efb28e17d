//! itemload CLI - Turn merchandise spreadsheets into SQL INSERT statements
//!
//! # Commands
//!
//! ```bash
//! itemload convert                         # MERCANCIA+todos.xlsx → insert_statements.txt
//! itemload convert lista.xlsx -o out.sql   # Explicit input and output
//! itemload convert --config itemload.json  # Settings from a config file
//! itemload parse lista.xlsx                # Reshaped rows as JSON
//! itemload sheets lista.xlsx               # List sheet names
//! itemload example-config                  # Print the default config
//! ```

use clap::{Parser, Subcommand};
use itemload::logs::LOG_BROADCASTER;
use itemload::transform::load_rows;
use itemload::{convert_file, list_sheets, run, write_to, LoaderConfig, OutputFormat};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "itemload")]
#[command(about = "Convert merchandise spreadsheets into SQL INSERT statements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input selection shared by commands that read a spreadsheet
#[derive(clap::Args)]
struct InputArgs {
    /// Spreadsheet to read (xlsx, xls, ods, csv)
    input: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sheet name (default: Sheet1)
    #[arg(short, long, conflicts_with = "first_sheet")]
    sheet: Option<String>,

    /// Read the first sheet whatever its name
    #[arg(long)]
    first_sheet: bool,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Rows above the header row
    #[arg(long)]
    skip_rows: Option<usize>,

    /// Leading columns to discard
    #[arg(long)]
    drop_columns: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet into INSERT statements
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Prefix for picture URLs (the product code is appended)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Output file (default: insert_statements.txt)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write statements to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Target table
        #[arg(short, long)]
        table: Option<String>,

        /// Output format: sql or jsonl
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Only print errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// Read and reshape a spreadsheet, output rows as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Workbook to inspect
        input: PathBuf,
    },

    /// Print the default configuration as JSON
    ExampleConfig,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            base_url,
            output,
            stdout,
            table,
            format,
            quiet,
        } => cmd_convert(input, base_url, output, stdout, table, format, quiet),

        Commands::Parse { input, output } => cmd_parse(input, output.as_deref()),

        Commands::Sheets { input } => cmd_sheets(&input),

        Commands::ExampleConfig => cmd_example_config(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Defaults, then config file, then environment, then flags
fn load_config(args: InputArgs) -> Result<LoaderConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(ref path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    config.apply_env()?;

    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(sheet) = args.sheet {
        config.sheet = Some(sheet);
    }
    if args.first_sheet {
        config.sheet = None;
    }
    if let Some(d) = args.delimiter {
        config.delimiter = Some(d);
    }
    if let Some(n) = args.skip_rows {
        config.layout.skip_rows = n;
    }
    if let Some(n) = args.drop_columns {
        config.layout.drop_columns = n;
    }

    Ok(config)
}

fn cmd_convert(
    input: InputArgs,
    base_url: Option<String>,
    output: Option<PathBuf>,
    stdout: bool,
    table: Option<String>,
    format: Option<OutputFormat>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(input)?;
    if let Some(url) = base_url {
        config.picture_base_url = url;
    }
    if let Some(path) = output {
        config.output = path;
    }
    if let Some(t) = table {
        config.table = t;
    }
    if let Some(f) = format {
        config.format = f;
    }
    LOG_BROADCASTER.set_quiet(quiet);

    if stdout {
        let statements = convert_file(&config)?;
        write_to(io::stdout().lock(), &statements, config.format, config.placeholder)?;
        return Ok(());
    }

    let summary = run(&config)?;
    println!("SQL statements have been saved to {}", summary.output.display());
    Ok(())
}

fn cmd_parse(input: InputArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(input)?;
    let (reshaped, _) = load_rows(&config)?;

    let json = serde_json::to_string_pretty(&reshaped.rows)?;
    write_output(&json, output)
}

fn cmd_sheets(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let sheets = list_sheets(input)?;
    eprintln!("📋 {} sheet(s) in {}:", sheets.len(), input.display());
    for (i, name) in sheets.iter().enumerate() {
        println!("[{:2}] {}", i + 1, name);
    }
    Ok(())
}

fn cmd_example_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", LoaderConfig::default().to_json()?);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
