use utilkit::defaults::Defaults;

pub type CmdResult<T> = utilkit::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub defaults: Defaults,
}

pub mod color;
pub mod config;
pub mod env;
pub mod json;
pub mod string;
pub mod time;
pub mod uuid;

pub(crate) fn run_raw(
    command: crate::Commands,
    global: &GlobalArgs,
) -> utilkit::Result<(String, i32)> {
    match command {
        crate::Commands::Color(args) => color::run_raw(args, global),
        _ => Err(utilkit::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (utilkit::Result<serde_json::Value>, i32) {
    match command {
        // Commands without global context
        crate::Commands::Env(args) => dispatch!(args, env),
        crate::Commands::Time(args) => dispatch!(args, time),
        crate::Commands::Uuid(args) => dispatch!(args, uuid),
        crate::Commands::Config(args) => dispatch!(args, config),

        // Commands with global context
        crate::Commands::String(args) => dispatch!(args, global, string),
        crate::Commands::Json(args) => dispatch!(args, global, json),
        crate::Commands::Color(args) => dispatch!(args, global, color),
    }
}
