//! `actionwire check`: extract, validate, and render without writing anything.

use actionwire_sdk::{pipeline, GeneratorConfig};

use crate::output;

pub(crate) fn handle_check_command(config: &GeneratorConfig) -> anyhow::Result<()> {
    let artifacts = pipeline::generate(config)?;
    let schema = &artifacts.schema;

    output::success(format!(
        "Schema OK: {} actions, {} structs in {} files",
        schema.actions.len(),
        schema.structs.len(),
        artifacts.files
    ));
    for action in &schema.actions {
        output::label(
            &action.name,
            format!(
                "{} -> {}{}",
                action.request_type,
                action.response_type,
                if action.is_async { " (async)" } else { "" }
            ),
        );
    }
    Ok(())
}
