use super::GroupSpec;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::debug;

/// Serialization format of a grouping spec file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Toml,
    Json,
}

impl SpecFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(anyhow!(
                "Unsupported grouping spec extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            )),
        }
    }
}

/// Parse and validate a grouping spec
pub fn parse_group_spec(content: &str, format: SpecFormat) -> Result<GroupSpec> {
    let spec: GroupSpec = match format {
        SpecFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML grouping spec")?,
        SpecFormat::Toml => toml::from_str(content).context("Invalid TOML grouping spec")?,
        SpecFormat::Json => serde_json::from_str(content).context("Invalid JSON grouping spec")?,
    };
    spec.validate()?;
    Ok(spec)
}

/// Load a grouping spec from `path`, choosing the format by extension
pub fn load_group_spec(path: &Path) -> Result<GroupSpec> {
    let format = SpecFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grouping spec {}", path.display()))?;
    let spec = parse_group_spec(&content, format)
        .with_context(|| format!("Failed to load grouping spec {}", path.display()))?;
    debug!("Loaded grouping spec from {}: {:?}", path.display(), spec);
    Ok(spec)
}
