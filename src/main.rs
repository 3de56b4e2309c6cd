use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;
mod tty;

use commands::{color, config, env, json, string, time, uuid};
use utilkit::defaults;
use utilkit::logger::{self, Logger};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "utilkit")]
#[command(version = VERSION)]
#[command(about = "Small utilities for strings, env vars, JSON, colors, time and UUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Case conversion, slugs, truncation and padding
    #[command(visible_alias = "str")]
    String(string::StringArgs),
    /// Read environment variables with fallbacks
    Env(env::EnvArgs),
    /// Reformat, compare and edit JSON documents
    Json(json::JsonArgs),
    /// ANSI color codes and painting
    Color(color::ColorArgs),
    /// Time formatting, parsing and durations
    Time(time::TimeArgs),
    /// Generate, validate and parse UUIDs
    Uuid(uuid::UuidArgs),
    /// Manage utilkit configuration
    Config(config::ConfigArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Color(args) if color::is_raw(args) => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let defaults = defaults::load_defaults();
    logger::init(Logger::from_config(&defaults.logger));
    utilkit::log_debug!("loaded configuration (level {})", defaults.logger.level.as_str());

    let global = GlobalArgs { defaults };

    match response_mode(&cli.command) {
        ResponseMode::Raw => match commands::run_raw(cli.command, &global) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let exit_code = output::exit_code_for_error(err.code);
                let _ = output::print_result::<serde_json::Value>(Err(err));
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        },
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli.command, &global);
            let _ = output::print_json_result(json_result);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
