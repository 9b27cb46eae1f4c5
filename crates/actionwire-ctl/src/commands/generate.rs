//! `actionwire generate`: render both artifacts and write them (or print them).

use actionwire_sdk::{pipeline, GeneratorConfig};

use crate::output;

pub(crate) fn handle_generate_command(config: &GeneratorConfig, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        let artifacts = pipeline::generate(config)?;
        for (path, contents) in [
            (&config.client_out, &artifacts.client),
            (&config.server_out, &artifacts.server),
        ] {
            output::dim(format!("// ---- {} ----", path.display()));
            output::raw(contents);
        }
        return Ok(());
    }

    let summary = pipeline::run(config)?;
    if summary.actions == 0 {
        output::warning(format!(
            "No actions found under '{}' (marker '{}')",
            config.source_root.display(),
            config.marker
        ));
    }
    output::success(format!(
        "Generated {} actions and {} structs from {} files",
        summary.actions, summary.structs, summary.files
    ));
    output::label("Client", summary.client_out.display());
    output::label("Server", summary.server_out.display());
    Ok(())
}
