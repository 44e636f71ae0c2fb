pub(crate) mod check;
pub(crate) mod paths;
pub(crate) mod validate;
pub(crate) mod walk;

use std::path::Path;
use std::process;

use waypoint_interchange::CompiledWizard;

use crate::{report_error, OutputFormat};

/// Load and compile a definition, exiting with status 1 on failure.
pub(crate) fn load_wizard(file: &Path, output: OutputFormat, quiet: bool) -> CompiledWizard {
    let definition = match waypoint_interchange::load(file) {
        Ok(d) => d,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };
    match definition.compile() {
        Ok(w) => w,
        Err(e) => {
            let msg = format!("error compiling '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
