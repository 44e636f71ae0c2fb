use std::path::Path;
use std::process;

use waypoint_interchange::Format;

use crate::{report_error, OutputFormat};

static DEFINITION_SCHEMA_STR: &str = include_str!("../../../../docs/definition-schema.json");

pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(DEFINITION_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!(
                "internal error: failed to parse embedded definition schema: {}",
                e
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc_str = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    // TOML documents are checked against the same schema as their JSON form.
    let doc: serde_json::Value = match Format::from_path(file) {
        Format::Toml => match toml::from_str(&doc_str) {
            Ok(v) => v,
            Err(e) => {
                let msg = format!("error parsing TOML in '{}': {}", file.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
        Format::Json => match serde_json::from_str(&doc_str) {
            Ok(v) => v,
            Err(e) => {
                let msg = format!("error parsing JSON in '{}': {}", file.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid definition");
                for err in &errors {
                    eprintln!("  - {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": false,
                "errors": errors
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(1);
}
