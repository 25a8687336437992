//! filedesk - Entry Point
//!
//! Runs one CGI request by default, or an HTTP endpoint with `serve`.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use filedesk::EndpointConfig;
use filedesk::protocol::ActionResult;
use filedesk::server::{Server, cgi};
use filedesk::utils::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(name = "filedesk")]
#[command(about = "JSON file-management endpoint confined to an upload directory")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ~/.filedesk.json)
    #[arg(short, long, env = "FILEDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve requests over HTTP instead of handling a single CGI request
    Serve {
        /// Address to bind to
        #[arg(short, long, env = "FILEDESK_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(EndpointConfig::default_path);
    let config = EndpointConfig::load(&config_path);

    match cli.command {
        None => run_cgi(config).await,
        Some(Command::Serve { bind }) => {
            let config = match config {
                Ok(config) => config,
                Err(e) => {
                    error!("Configuration error ({}): {}", config_path.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            run_server(config, &bind).await
        }
    }
}

async fn run_cgi(config: Result<EndpointConfig, config::ConfigError>) -> ExitCode {
    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            let result = ActionResult::error(format!("Configuration error: {e}"));
            if let Err(e) = cgi::write_response(&mut stdout, &result).await {
                error!("Failed to write response: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    filedesk::server::prepare_root(&config);

    match cgi::respond(&config, &cgi::CgiEnv::from_env(), &mut stdin, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to write response: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_server(config: EndpointConfig, bind: &str) -> ExitCode {
    info!("Launching filedesk HTTP endpoint...");

    let server = match Server::bind(config, bind).await {
        Ok(server) => server,
        Err(_) => return ExitCode::FAILURE,
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
