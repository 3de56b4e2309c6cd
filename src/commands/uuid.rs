use clap::{Args, Subcommand};
use serde::Serialize;

use utilkit::uuid;

use super::CmdResult;

#[derive(Args)]
pub struct UuidArgs {
    #[command(subcommand)]
    command: UuidCommand,
}

#[derive(Subcommand)]
enum UuidCommand {
    /// Generate random v4 UUIDs
    Generate {
        /// How many to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },
    /// Check whether a string is a canonical UUID
    Validate {
        /// Candidate UUID
        value: String,
    },
    /// Decode a UUID into its bytes and version
    Parse {
        /// UUID to decode
        value: String,
    },
}

#[derive(Debug, Serialize)]
pub struct UuidOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<Vec<u8>>,
}

pub fn run_json(args: UuidArgs) -> CmdResult<UuidOutput> {
    let out = match args.command {
        UuidCommand::Generate { count } => UuidOutput {
            command: "uuid.generate",
            uuids: Some((0..count).map(|_| uuid::generate()).collect()),
            value: None,
            valid: None,
            version: None,
            bytes: None,
        },
        UuidCommand::Validate { value } => {
            let valid = uuid::is_valid(&value);
            UuidOutput {
                command: "uuid.validate",
                uuids: None,
                version: uuid::version(&value),
                value: Some(value),
                valid: Some(valid),
                bytes: None,
            }
        }
        UuidCommand::Parse { value } => {
            let bytes = uuid::parse(&value)?;
            UuidOutput {
                command: "uuid.parse",
                uuids: None,
                valid: Some(true),
                version: uuid::version(&value),
                value: Some(uuid::format(bytes)),
                bytes: Some(bytes.to_vec()),
            }
        }
    };

    Ok((out, 0))
}
