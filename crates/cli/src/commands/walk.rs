use std::path::Path;
use std::process;

use waypoint_core::StepId;
use waypoint_engine::{Action, ActionError, ActionOutcome, NavigationEngine, NoopHandler};

use crate::commands::load_wizard;
use crate::{report_error, OutputFormat};

/// Upper bound on moves, so a definition whose facts keep it in a loop
/// terminates.
const MAX_MOVES: usize = 10_000;

struct Visited {
    id: String,
    name: String,
}

pub(crate) fn cmd_walk(
    file: &Path,
    overrides: &[String],
    complete_all: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let wizard = load_wizard(file, output, quiet);
    let wizard_id = wizard.id.clone();

    // Document id and display name, indexed by step handle.
    let labels: Vec<(String, String)> = wizard
        .graph
        .steps()
        .map(|(id, step)| {
            let key = wizard.step_key(id).unwrap_or_default().to_string();
            (key, step.name.clone())
        })
        .collect();
    let visited = |step: StepId| {
        let (id, name) = labels.get(step.index()).cloned().unwrap_or_default();
        Visited { id, name }
    };

    let (graph, mut facts) = wizard.into_parts();
    for assignment in overrides {
        match waypoint_interchange::parse_assignment(assignment) {
            Ok((name, value)) => {
                facts.insert(name, value);
            }
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        }
    }

    let mut engine = match NavigationEngine::new(graph, facts) {
        Ok(e) => e,
        Err(e) => {
            let msg = format!("invalid wizard '{}': {}", wizard_id, e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    engine.subscribe_fn(|event, view| {
        tracing::debug!(?event, active = %view.active_step(), "navigation event");
    });

    if complete_all {
        let steps: Vec<StepId> = engine.steps().collect();
        for step in steps {
            if let Err(e) = engine.set_step_complete(step, true) {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        }
    }

    let mut route = vec![visited(engine.active_step())];
    let mut handler = NoopHandler;
    let mut moves = 0;

    loop {
        let active = engine.active_step();
        let action = if engine.is_terminal_step(active) {
            Action::Finish
        } else {
            Action::Next
        };

        match engine.perform(action, &mut handler) {
            Ok(ActionOutcome::Moved { step }) => route.push(visited(step)),
            Ok(ActionOutcome::Finished { .. }) => break,
            Ok(ActionOutcome::Cancelled { .. }) => break,
            Err(ActionError::Disabled(_)) => {
                let stuck = visited(active);
                let reason = if engine.is_step_busy(active).unwrap_or(false) {
                    "is busy"
                } else {
                    "is not complete"
                };
                let msg = format!("walk stopped: step '{}' {}", stuck.id, reason);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
            Err(e) => {
                let msg = format!("walk stopped at step '{}': {}", visited(active).id, e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }

        moves += 1;
        if moves >= MAX_MOVES {
            let msg = format!("walk did not reach the final step after {} moves", MAX_MOVES);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }

    if quiet {
        return;
    }
    let final_step = route.last().map(|s| s.id.clone()).unwrap_or_default();
    match output {
        OutputFormat::Json => {
            let steps: Vec<serde_json::Value> = route
                .iter()
                .map(|s| serde_json::json!({ "id": s.id, "name": s.name }))
                .collect();
            let json = serde_json::json!({
                "wizard": wizard_id,
                "steps": steps,
                "final_step": final_step,
                "finished": true,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            for (i, step) in route.iter().enumerate() {
                println!("{:>3}. {} ({})", i + 1, step.id, step.name);
            }
            println!("finished at '{}'", final_step);
        }
    }
}
