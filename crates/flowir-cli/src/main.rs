//! flowir CLI: render queries and expressions canonically, unflatten NDJSON.

use clap::{Parser, Subcommand};
use flowir_cli::{input_sources, QueryFlags};
use flowir_core::config::IrConfig;
use flowir_core::dag::{Op, Trunk};
use flowir_core::expr::Expr;
use flowir_runtime::{NestDotted, Value};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowir", version = flowir_core::VERSION)]
#[command(about = "flowir: canonical rendering of dataflow DAGs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical DAG of a query over its inputs
    Fmt {
        /// Source file containing query text (may be repeated)
        #[arg(short = 'I', long = "include")]
        includes: Vec<PathBuf>,

        /// Format of file inputs (e.g., json, zng)
        #[arg(short = 'i', long = "input-format")]
        format: Option<String>,

        /// Also print the blake3 fingerprint of the rendering
        #[arg(long)]
        fingerprint: bool,

        /// Query text followed by inputs (files, URLs, or - for stdin)
        args: Vec<String>,
    },

    /// Render one expression given as a YAML document
    Expr {
        /// Expression document
        yaml: String,
    },

    /// Nest dotted field names of each NDJSON record
    Unflatten {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fmt {
            includes,
            format,
            fingerprint,
            args,
        } => fmt_query(includes, format.as_deref(), fingerprint, &args),
        Commands::Expr { yaml } => fmt_expr(&yaml),
        Commands::Unflatten { file } => unflatten(file.as_ref()),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config() -> Result<IrConfig, Box<dyn std::error::Error>> {
    let config = IrConfig::from_env();
    config.validate()?;
    Ok(config)
}

fn fmt_query(
    includes: Vec<PathBuf>,
    format: Option<&str>,
    fingerprint: bool,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let flags = QueryFlags { includes };
    let (inputs, mut query, implicit_yield) = flags.parse_sources_and_inputs(args)?;
    tracing::debug!(
        inputs = inputs.len(),
        first = query.ops.first().map_or("", Op::name),
        implicit_yield,
        "resolved query"
    );

    let sources = input_sources(&inputs, format);
    if !sources.is_empty() {
        let trunks = sources.into_iter().map(Trunk::new).collect();
        query.ops.insert(0, Op::From { trunks });
    }

    let root = Op::Sequential(query);
    println!("{}", flowir_fmt::dag_with(&root, &config));
    if fingerprint {
        println!("fingerprint: {}", flowir_fmt::fingerprint(&root));
    }
    Ok(())
}

fn fmt_expr(yaml: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let expr: Expr = serde_yaml::from_str(yaml)?;
    println!("{}", flowir_fmt::dag_expr_with(&expr, &config));
    Ok(())
}

fn unflatten(file: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(fs::File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut out = io::BufWriter::new(io::stdout().lock());
    let mut nest = NestDotted::new(&config)?;
    let mut records = 0usize;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value = Value::from_json_str(&line)?;
        writeln!(out, "{}", nest.call(&value).to_json())?;
        records += 1;
    }
    out.flush()?;
    tracing::debug!(records, shapes = nest.cached_shapes(), "unflatten done");
    Ok(())
}
