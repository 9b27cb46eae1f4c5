//! `actionwire schema`: print the extracted schema.

use actionwire_sdk::codegen::{extract_schema, Schema};
use actionwire_sdk::GeneratorConfig;
use anyhow::Context;

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub(crate) enum SchemaFormat {
    #[default]
    Json,
    Yaml,
}

pub(crate) fn handle_schema_command(
    config: &GeneratorConfig,
    format: SchemaFormat,
) -> anyhow::Result<()> {
    config.validate()?;
    let schema = extract_schema(&config.source_root, &config.marker)?.into_result()?;
    output::raw(&render_schema(&schema, format)?);
    Ok(())
}

fn render_schema(schema: &Schema, format: SchemaFormat) -> anyhow::Result<String> {
    let mut rendered = match format {
        SchemaFormat::Json => {
            serde_json::to_string_pretty(schema).context("failed to serialize schema as JSON")?
        }
        SchemaFormat::Yaml => {
            serde_yaml::to_string(schema).context("failed to serialize schema as YAML")?
        }
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use actionwire_sdk::codegen::{ActionDefinition, SourceLocation};

    use super::*;

    fn schema() -> Schema {
        Schema {
            actions: vec![ActionDefinition {
                name: "ping".into(),
                request_type: "String".into(),
                response_type: "String".into(),
                error_type: None,
                fallible: false,
                is_async: false,
                description: None,
                location: SourceLocation::new("health.rs", 2, 8),
            }],
            ..Schema::default()
        }
    }

    #[test]
    fn test_render_json() {
        let json = render_schema(&schema(), SchemaFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["actions"][0]["name"], "ping");
        assert_eq!(value["actions"][0]["location"]["line"], 2);
        assert!(value["actions"][0].get("error_type").is_none());
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render_schema(&schema(), SchemaFormat::Yaml).unwrap();
        assert!(yaml.contains("name: ping"));
        assert!(yaml.ends_with('\n'));
    }
}
