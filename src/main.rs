//! nn-forecast command line.
//!
//! Trains a fresh network on the given sequence and prints the predicted
//! continuation, one value per line (or a JSON array with `--json`).

use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nn_forecast::data::parse_sequence;
use nn_forecast::{ForecastError, ModelKind, ModelTemplate, Predictor};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "nn-forecast")]
#[command(about = "Extrapolate a short numeric sequence with a tiny neural network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true, value_parser = parse_level)]
    log_level: Level,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the next values of a sequence
    Predict {
        /// Model kind: boolean, double, double-timestamp or other
        #[arg(short, long, default_value = "double")]
        mode: ModelKind,

        /// Number of values to predict
        #[arg(short, long, default_value = "1")]
        steps: usize,

        /// Read the sequence from a file ("-" for stdin) instead of VALUES
        #[arg(short, long)]
        input: Option<String>,

        /// JSON template overriding the mode's architecture and hyperparameters
        #[arg(short, long)]
        template: Option<String>,

        /// Estimate gradients on all cores (faster; may differ in the last digit)
        #[arg(long)]
        parallel: bool,

        /// Print the predictions as a JSON array
        #[arg(long)]
        json: bool,

        /// Sequence values, e.g. `1 2 3 4 5` or `1,2,3,4,5`
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
    },

    /// Print the template a mode would use, as JSON
    Template {
        #[arg(short, long, default_value = "double")]
        mode: ModelKind,

        /// Write the template to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Sequence values; only the boolean mode looks at them
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {e}");
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), ForecastError> {
    match command {
        Commands::Predict { mode, steps, input, template, parallel, json, values } => {
            let sequence = read_sequence(input.as_deref(), &values)?;

            let mut predictor = Predictor::new(mode).parallel(parallel);
            if let Some(path) = template {
                predictor = predictor.with_template(ModelTemplate::load_json(&path)?);
            }

            let predictions = predictor.predict(&sequence, steps)?;
            if json {
                println!("{}", serde_json::to_string(&predictions)?);
            } else {
                for value in predictions {
                    println!("{value}");
                }
            }
        }
        Commands::Template { mode, output, values } => {
            let sequence = parse_values(&values)?;
            let template = mode.template(&sequence);
            match output {
                Some(path) => template.save_json(&path)?,
                None => println!("{}", serde_json::to_string_pretty(&template)?),
            }
        }
    }
    Ok(())
}

fn parse_level(s: &str) -> Result<Level, String> {
    match s {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(format!("unknown log level `{other}` (expected trace, debug, info, warn or error)")),
    }
}

fn read_sequence(input: Option<&str>, values: &[String]) -> Result<Vec<f64>, ForecastError> {
    let text = match input {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
        None => return parse_values(values),
    };
    parse_sequence(&text)
}

/// Positional values may themselves be comma separated (`1,2,3`).
fn parse_values(values: &[String]) -> Result<Vec<f64>, ForecastError> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.parse::<f64>().map_err(|_| ForecastError::Parse(cell.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_accepts_level_names() {
        let cli = Cli::try_parse_from(["nn-forecast", "--log-level", "debug", "template"]).unwrap();
        assert_eq!(cli.log_level, Level::DEBUG);
        let cli = Cli::try_parse_from(["nn-forecast", "template"]).unwrap();
        assert_eq!(cli.log_level, Level::WARN);
    }

    #[test]
    fn misspelled_log_level_is_rejected() {
        let parsed = Cli::try_parse_from(["nn-forecast", "--log-level", "verbose", "template"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn template_output_writes_a_loadable_file() {
        let path = std::env::temp_dir().join(format!("nn-forecast-cli-{}.json", std::process::id()));
        let path = path.to_str().unwrap().to_string();
        let cli = Cli::try_parse_from([
            "nn-forecast", "template", "--mode", "boolean", "--output", &path, "0", "0", "1", "1",
        ])
        .unwrap();
        run(cli.command).unwrap();

        let loaded = ModelTemplate::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, ModelKind::Boolean.template(&[0.0, 0.0, 1.0, 1.0]));
    }
}
