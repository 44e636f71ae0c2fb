use std::path::Path;
use std::process;

use waypoint_engine::NavigationEngine;

use crate::commands::load_wizard;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let wizard = load_wizard(file, output, quiet);
    let id = wizard.id.clone();
    let title = wizard.title.clone();
    let (graph, facts) = wizard.into_parts();
    let declared_steps = graph.step_count();
    let declared_paths = graph.path_count();

    let engine = match NavigationEngine::new(graph, facts) {
        Ok(e) => e,
        Err(e) => {
            let msg = format!("invalid wizard '{}': {}", id, e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let index = engine.index();
    let first_step = engine.step_name(index.first_step());
    let terminal_path = engine.graph().path_name(index.terminal_path());
    let terminal_step = engine.step_name(index.terminal_step());

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": true,
                "id": id,
                "title": title,
                "steps": declared_steps,
                "reachable_steps": index.step_count(),
                "paths": declared_paths,
                "reachable_paths": index.reachable_paths().len(),
                "first_step": first_step,
                "terminal_path": terminal_path,
                "terminal_step": terminal_step,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            println!("{}: ok", title.as_deref().unwrap_or(&id));
            println!(
                "  Steps: {} declared, {} reachable",
                declared_steps,
                index.step_count()
            );
            println!(
                "  Paths: {} declared, {} reachable",
                declared_paths,
                index.reachable_paths().len()
            );
            println!("  First step: {}", first_step);
            println!("  Final step: {} (path '{}')", terminal_step, terminal_path);
        }
    }
}
