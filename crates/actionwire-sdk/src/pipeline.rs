//! End-to-end generation: extract, validate, render, write.
//!
//! Nothing touches the filesystem until both artifacts have rendered. Writes are staged
//! as temp files beside their destinations and only persisted once both are staged, so
//! a failed run leaves the previous outputs untouched. A replaced file keeps its
//! permissions; new files are created `0644` on Unix.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::codegen::validate::field_case_violations;
use crate::codegen::{dispatch, extract_schema, typescript, CodegenError, Schema};
use crate::config::GeneratorConfig;

/// Both rendered artifacts plus the schema they came from.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    pub schema: Schema,
    /// TypeScript client module
    pub client: String,
    /// Rust dispatch module
    pub server: String,
    /// Number of source files scanned
    pub files: usize,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub actions: usize,
    pub structs: usize,
    pub files: usize,
    pub client_out: PathBuf,
    pub server_out: PathBuf,
}

/// Extract, validate, and render without writing anything.
pub fn generate(config: &GeneratorConfig) -> Result<GeneratedArtifacts, CodegenError> {
    config.validate()?;
    let route_path = config.route_path()?;

    let mut extraction = extract_schema(&config.source_root, &config.marker)?;
    for violation in field_case_violations(&extraction.schema, config.client.field_case) {
        extraction.report.push(violation);
    }
    let files = extraction.files;
    let schema = extraction.into_result()?;
    tracing::debug!(
        actions = schema.actions.len(),
        structs = schema.structs.len(),
        files,
        "Schema validated"
    );

    let client = typescript::render(&schema, &config.endpoint, &config.client)?;
    let server = dispatch::render(&schema, &config.server, &route_path)?;

    Ok(GeneratedArtifacts {
        schema,
        client,
        server,
        files,
    })
}

/// Generate and write both artifacts to the configured paths.
pub fn run(config: &GeneratorConfig) -> Result<GenerationSummary, CodegenError> {
    let artifacts = generate(config)?;
    write_artifacts(&[
        (config.client_out.as_path(), artifacts.client.as_str()),
        (config.server_out.as_path(), artifacts.server.as_str()),
    ])?;

    Ok(GenerationSummary {
        actions: artifacts.schema.actions.len(),
        structs: artifacts.schema.structs.len(),
        files: artifacts.files,
        client_out: config.client_out.clone(),
        server_out: config.server_out.clone(),
    })
}

/// Stage every `(path, contents)` pair, then persist them all.
pub fn write_artifacts(outputs: &[(&Path, &str)]) -> Result<(), CodegenError> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        staged.push((*path, stage(path, contents)?));
    }

    for (path, file) in staged {
        file.persist(path)
            .map_err(|e| CodegenError::io(path, e.error))?;
        tracing::info!(path = %path.display(), "Wrote generated file");
    }
    Ok(())
}

fn stage(path: &Path, contents: &str) -> Result<NamedTempFile, CodegenError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| CodegenError::io(parent, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| CodegenError::io(path, e))?;
    file.flush().map_err(|e| CodegenError::io(path, e))?;
    if let Some(permissions) = output_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| CodegenError::io(path, e))?;
    }
    Ok(file)
}

/// Permissions for the file about to replace `path`.
fn output_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(existing) => Some(existing.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
