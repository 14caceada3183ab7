//! apicli command-line entry point.
//!
//! Lists, inspects and calls APIs from the catalog. Logging goes to stderr
//! through env_logger (`RUST_LOG=apicli=debug` for details); response bodies
//! go to stdout.
//!
//! ```text
//! apicli list openai
//! apicli call openai.chat PROMPT="hello" --jq '.choices[0].message.content'
//! ```

use apicli::catalog::filter_apis;
use apicli::{ApiCliConfig, ApiClient, FetchOptions, ProcessEnv};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "apicli", version, about = "Run catalogued HTTP APIs")]
struct Cli {
    /// Catalog file to use instead of ~/.apicli
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalogued APIs, optionally filtered by a substring of `service.name`
    List { pattern: Option<String> },

    /// Print the catalog file in use
    Where,

    /// Print the unresolved definition of matching APIs
    Show { pattern: String },

    /// Call an API
    Call {
        /// `service.name`
        id: String,

        /// Variable overrides as KEY=VALUE
        #[arg(value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// jq filter applied to the response body
        #[arg(long, value_name = "QUERY")]
        jq: Option<String>,

        /// Print request and response diagnostics to stderr
        #[arg(long)]
        debug: bool,

        /// Print the elapsed time to stderr
        #[arg(long)]
        time: bool,
    },
}

fn parse_var(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> apicli::Result<()> {
    let client = ApiClient::from_config(ApiCliConfig::from_env(&ProcessEnv))?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::List { pattern } => {
            let apis = client.get_apis(config_path)?;
            for api in filter_apis(&apis, pattern.as_deref().unwrap_or_default()) {
                println!(
                    "{:<32} {:<6} {}",
                    api.id(),
                    api.method.as_deref().unwrap_or("GET"),
                    api.url.as_deref().unwrap_or_default()
                );
            }
        }
        Command::Where => {
            let loader = client.builder().loader();
            match loader.locate(config_path) {
                Some(path) => println!("{}", path.display()),
                None => {
                    let searched: Vec<String> = loader
                        .default_paths()
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect();
                    eprintln!("No catalog found (searched: {})", searched.join(", "));
                }
            }
        }
        Command::Show { pattern } => {
            let apis = client.get_apis(config_path)?;
            for api in filter_apis(&apis, &pattern) {
                println!("{}", serde_json::to_string_pretty(api)?);
            }
        }
        Command::Call {
            id,
            vars,
            jq,
            debug,
            time,
        } => {
            let mut options = FetchOptions::new().debug(debug);
            options.vars.extend(vars);
            options.config_path = cli.config.clone();

            let start = Instant::now();
            let handle = client.get(&id, &options).await?;
            let output = match jq {
                Some(query) => handle.query(&query)?,
                None => match handle.json() {
                    Ok(value) => format!("{}\n", serde_json::to_string_pretty(&value)?),
                    Err(_) => handle.into_text(),
                },
            };
            print!("{}", output);
            if time {
                eprintln!("{}ms", start.elapsed().as_millis());
            }
        }
    }

    Ok(())
}
