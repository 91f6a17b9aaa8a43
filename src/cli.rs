// Command-line front end over the catalog

use crate::catalog::{EntityKind, FieldMap};
use crate::config::Config;
use crate::errors::{AppError, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "identity-catalog",
    about = "Inspect and validate identity and access management records",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the entities known to the catalog
    Entities,
    /// Print the field table of an entity
    Describe(EntityArgs),
    /// Validate a JSON object against an entity and print the normalized record
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct EntityArgs {
    /// Catalog name of the entity, e.g. `application` or `identity_claim`
    #[arg(value_parser = parse_entity)]
    pub entity: EntityKind,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[arg(value_parser = parse_entity)]
    pub entity: EntityKind,
    /// Read the payload from this file instead of stdin
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

fn parse_entity(name: &str) -> std::result::Result<EntityKind, String> {
    EntityKind::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown entity '{}', expected one of: {}", name, known.join(", "))
    })
}

/// Parse arguments and run the selected command
pub fn run(config: &Config) -> Result<()> {
    let cli = Cli::parse();
    execute(cli.command, config, &mut io::stdout().lock())
}

pub fn execute<W: Write>(command: Command, config: &Config, out: &mut W) -> Result<()> {
    match command {
        Command::Entities => {
            let names: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
            emit(out, config, &names)
        }
        Command::Describe(args) => emit(out, config, &describe(args.entity)),
        Command::Validate(args) => {
            let payload = match &args.input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let normalized = validate_payload(args.entity, &payload)?;
            emit(out, config, &normalized)
        }
    }
}

/// Field table of an entity as a JSON document
pub fn describe(kind: EntityKind) -> Value {
    json!({
        "entity": kind.as_str(),
        "fields": kind.fields(),
    })
}

/// Parse a JSON object and run it through validate-and-construct and export
pub fn validate_payload(kind: EntityKind, payload: &str) -> Result<FieldMap> {
    let fields = match serde_json::from_str::<Value>(payload)? {
        Value::Object(map) => map,
        other => {
            return Err(AppError::InvalidPayload(format!(
                "expected a JSON object for {}, got {}",
                kind,
                crate::catalog::validation::describe_value(&other)
            )))
        }
    };

    let normalized = kind.normalize(&fields)?;
    tracing::info!(entity = %kind, fields = normalized.len(), "Payload validated");
    Ok(normalized)
}

fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, config: &Config, value: &T) -> Result<()> {
    if config.output.pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObservabilityConfig, OutputConfig};

    fn config(pretty: bool) -> Config {
        Config {
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                log_format: "pretty".to_string(),
            },
            output: OutputConfig { pretty },
        }
    }

    #[test]
    fn test_parse_validate_command() {
        let cli = Cli::try_parse_from([
            "identity-catalog",
            "validate",
            "application_ownership",
            "--input",
            "payload.json",
        ])
        .unwrap();

        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.entity, EntityKind::ApplicationOwnership);
                assert_eq!(args.input, Some(PathBuf::from("payload.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_entity_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["identity-catalog", "describe", "user"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_payload_null_marks_missing_fields() {
        let normalized =
            validate_payload(EntityKind::IdentityType, r#"{"type_name": "service"}"#).unwrap();
        assert_eq!(normalized["type_name"], json!("service"));
        assert_eq!(normalized["description"], Value::Null);
    }

    #[test]
    fn test_validate_payload_errors() {
        let not_object = validate_payload(EntityKind::Claim, "[1, 2]").unwrap_err();
        assert!(matches!(not_object, AppError::InvalidPayload(_)));

        let malformed = validate_payload(EntityKind::Claim, "{").unwrap_err();
        assert!(matches!(malformed, AppError::Json(_)));

        let payload = json!({"name": "n".repeat(41), "environment": "e".repeat(51)}).to_string();
        match validate_payload(EntityKind::Application, &payload).unwrap_err() {
            AppError::Validation(e) => assert_eq!(e.fields(), vec!["name", "environment"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_describe_lists_field_table() {
        let doc = describe(EntityKind::Claim);
        assert_eq!(doc["entity"], json!("claim"));
        assert_eq!(
            doc["fields"][2],
            json!({"name": "value", "type": "text", "max_length": 512, "title": "Value for a claim"})
        );
    }

    #[test]
    fn test_entities_command_writes_compact_json() {
        let mut out = Vec::new();
        execute(Command::Entities, &config(false), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let names: Vec<String> = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(names.len(), EntityKind::ALL.len());
        assert_eq!(names[0], "application");
        assert!(!text.trim().contains('\n'));
    }
}
