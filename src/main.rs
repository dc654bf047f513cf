//! Benford: Benford's Law conformity checker CLI

use anyhow::{Context, Result};
use benford::config::{load_config, validate_threshold, CONFIG_FILENAME};
use benford::input::{parse_input, InputFormat};
use benford::logging::LoggingOpts;
use benford::reporter::{ConsoleReporter, JsonReporter};
use benford::sample::{BenfordSampler, DEFAULT_MAX_MAGNITUDE};
use benford::BenfordAnalyzer;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Benford: check whether positive integers follow Benford's Law
#[derive(Parser, Debug)]
#[command(name = "benford")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file: a JSON payload ({"numbers": [...]}), a JSON array, or plain numbers.
    /// Reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Quiet mode (verdict only)
    #[arg(long, short)]
    quiet: bool,

    /// Maximum per-digit probability difference (default 0.1)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// How to read the input
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// Path to config file (default: search .benfordrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(flatten)]
    logging: LoggingOpts,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run MCP server (stdio JSON-RPC)
    Mcp,

    /// Create .benfordrc.json with defaults
    Init {
        /// Conformity threshold to write (e.g. 0.1)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Print a {"numbers": [...]} payload of Benford-distributed integers
    Generate {
        /// How many numbers to generate
        #[arg(long, short, default_value_t = 1000)]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Largest power of ten used (1-18)
        #[arg(long, default_value_t = DEFAULT_MAX_MAGNITUDE)]
        max_magnitude: u32,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    args.logging.configure_logging();
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Mcp => benford::mcp::run_mcp_server().map(|_| ExitCode::SUCCESS),
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
            Commands::Generate {
                count,
                seed,
                max_magnitude,
            } => run_generate(count, seed, max_magnitude),
        };
    }

    let input_path = args.input.as_deref().filter(|p| *p != Path::new("-"));

    // Config search starts next to the input file, or in the current directory for stdin
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = match input_path.and_then(Path::parent) {
        Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
        _ => cwd.clone(),
    };

    // --config is relative to where the command runs; work_dir only drives the search
    let config_path = args.config.as_deref().map(|p| cwd.join(p));

    // CLI flags override config file
    let config = load_config(&work_dir, config_path.as_deref())?.merge_with_cli(args.threshold);
    let threshold = validate_threshold(config.effective_threshold())?;

    let text = read_input(input_path)?;
    let value = parse_input(&text, args.format)?;

    let analyzer = BenfordAnalyzer::new().with_threshold(threshold);
    let verdict = match analyzer.check(&value) {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::info!(code = e.code(), "input rejected");
            if args.json {
                let mut reporter = JsonReporter::new();
                if args.pretty {
                    reporter = reporter.pretty();
                }
                println!("{}", reporter.report_error(&e));
            } else {
                ConsoleReporter::new().report_error(&e);
            }
            return Ok(ExitCode::from(2));
        }
    };

    if args.json {
        let mut reporter = JsonReporter::new();
        if args.pretty {
            reporter = reporter.pretty();
        }
        println!("{}", reporter.report(&verdict));
    } else if args.quiet {
        ConsoleReporter::new().quiet().report(&verdict);
    } else {
        ConsoleReporter::new().report(&verdict);
    }

    if verdict.conforms_to_benford {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold = validate_threshold(threshold.unwrap_or(benford::DEFAULT_THRESHOLD))?;
    let config = benford::config::Config {
        extends: None,
        threshold: Some(threshold),
    };
    let json = serde_json::to_string_pretty(&config)?;
    std::fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    eprintln!(
        "{}: Created {}",
        "Info".blue(),
        config_path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_generate(count: usize, seed: Option<u64>, max_magnitude: u32) -> Result<ExitCode> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sampler = BenfordSampler::new().with_max_magnitude(max_magnitude);
    let numbers = sampler.generate(count, &mut rng);
    println!("{}", serde_json::json!({ "numbers": numbers }));
    Ok(ExitCode::SUCCESS)
}
