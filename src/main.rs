use clap::{Args, Parser, Subcommand};
use envelope::config::Config;
use envelope::estimate;
use envelope::session::{Reply, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envelope")]
#[command(about = "Back-of-the-envelope calculator for system design estimates", long_about = None)]
struct Cli {
    /// Config file (default: ./envelope.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DisplayArgs {
    /// Target unit: auto, none, bytes, KB, MB, GB, TB, PB
    #[arg(short, long)]
    unit: Option<String>,

    /// Rate: none, /s, /min, /hour, /day, /month, /year
    #[arg(short, long, allow_hyphen_values = true)]
    rate: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single expression
    Eval {
        /// Expression (e.g., "30 billion * 500 bytes")
        expression: String,

        #[command(flatten)]
        display: DisplayArgs,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one expression per line of a file
    Batch {
        /// File path ("-" for stdin)
        path: String,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Interactive estimate sheet
    Session,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Eval {
            expression,
            display,
            json,
        } => eval_expression(&config, &expression, &display, json),
        Commands::Batch { path, display } => eval_batch(&config, &path, &display),
        Commands::Session => run_session(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

/// Command-line flags win over the config file
fn resolve<'a>(config: &'a Config, display: &'a DisplayArgs) -> (&'a str, &'a str) {
    (
        display.unit.as_deref().unwrap_or(config.defaults.unit.as_str()),
        display.rate.as_deref().unwrap_or(config.defaults.rate.as_str()),
    )
}

fn eval_expression(
    config: &Config,
    expression: &str,
    display: &DisplayArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (unit, rate) = resolve(config, display);
    let result = estimate::evaluate(expression, unit, rate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.result_display);
    }

    Ok(())
}

fn eval_batch(
    config: &Config,
    path: &str,
    display: &DisplayArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (unit, rate) = resolve(config, display);
    let content = if path == "-" {
        io::read_to_string(io::stdin())?
    } else {
        std::fs::read_to_string(path)?
    };

    let mut failures = 0;
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match estimate::evaluate(line, unit, rate) {
            Ok(result) => println!("{} = {}", result.expression, result.result_display),
            Err(e) => {
                eprintln!("line {}: {}", number + 1, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} expression(s) failed", failures).into());
    }
    Ok(())
}

fn run_session(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config.defaults.clone());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Back-of-the-Envelope Calculator (:help for commands)");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.handle_line(&line) {
            Reply::Nothing => {}
            Reply::Message(message) => println!("{}", message),
            Reply::Error(message) => eprintln!("Error: {}", message),
            Reply::Quit => break,
        }
    }

    if !session.estimates.is_empty() {
        println!("\nSummary");
        println!("{}", session.estimates.summary());
    }
    Ok(())
}
