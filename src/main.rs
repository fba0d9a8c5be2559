use anyhow::Context;
use clap::Parser;
use solidview_lib::{Config, Locale, ProblemInterpreter};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Interpret a solid-geometry problem and print the figure description as JSON.
#[derive(Parser, Debug)]
#[command(name = "solidview", version, about)]
struct Cli {
    /// Problem text. Read from stdin when omitted.
    problem: Option<String>,

    /// TOML config file. Environment variables (and `.env`) are used otherwise.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prompt and error-message language: `en` or `zh-CN`.
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Print the schema on a single line.
    #[arg(long)]
    compact: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    Ok(match cli.locale {
        Some(locale) => config.with_locale(locale),
        None => config,
    })
}

fn read_problem(cli: &Cli) -> anyhow::Result<String> {
    match &cli.problem {
        Some(problem) => Ok(problem.clone()),
        None => {
            let mut problem = String::new();
            std::io::stdin()
                .read_to_string(&mut problem)
                .context("reading problem from stdin")?;
            Ok(problem)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (config, problem) = match load_config(&cli).and_then(|c| Ok((c, read_problem(&cli)?))) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let interpreter = match ProblemInterpreter::from_config(&config) {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("{}", e.localized_message(config.locale));
            return ExitCode::FAILURE;
        }
    };

    match interpreter.interpret(&problem).await {
        Ok(schema) => {
            let rendered = if cli.compact {
                serde_json::to_string(&schema)
            } else {
                serde_json::to_string_pretty(&schema)
            };
            match rendered {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to serialize geometry: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("{}", e.localized_message(config.locale));
            ExitCode::FAILURE
        }
    }
}
