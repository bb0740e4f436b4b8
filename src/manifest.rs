//! Manifest adapters: writing a release version into the project descriptor
//! and catalog file, and reading single fields back out of TOML.

use crate::error::{ReleaseTrainError, Result};
use regex::Regex;
use serde_yaml::{Mapping, Value as YamlValue};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

fn read_existing(path: &Path, what: &str) -> Result<String> {
    if !path.is_file() {
        return Err(ReleaseTrainError::manifest(format!(
            "{} not found: {}",
            what,
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}

/// Replace the first `version = "..."` assignment in a pyproject file
#[instrument(skip_all, fields(path = %path.as_ref().display(), version = %version))]
pub fn bump_pyproject(path: impl AsRef<Path>, version: &str) -> Result<()> {
    let path = path.as_ref();
    let content = read_existing(path, "pyproject.toml")?;

    let re = Regex::new(r#"version = "[^"]+""#)
        .map_err(|e| ReleaseTrainError::manifest(e.to_string()))?;
    if !re.is_match(&content) {
        return Err(ReleaseTrainError::manifest(format!(
            "no version assignment in {}",
            path.display()
        )));
    }

    let replacement = format!(r#"version = "{}""#, version);
    let updated = re.replacen(&content, 1, regex::NoExpand(&replacement));
    fs::write(path, updated.as_ref())?;
    debug!("bumped pyproject version");
    Ok(())
}

/// Set the top-level `version` key of a YAML catalog, keeping key order
#[instrument(skip_all, fields(path = %path.as_ref().display(), version = %version))]
pub fn bump_catalog(path: impl AsRef<Path>, version: &str) -> Result<()> {
    let path = path.as_ref();
    let content = read_existing(path, "Catalog file")?;

    let mut catalog: YamlValue = serde_yaml::from_str(&content)?;
    if catalog.is_null() {
        catalog = YamlValue::Mapping(Mapping::new());
    }
    let mapping = catalog.as_mapping_mut().ok_or_else(|| {
        ReleaseTrainError::manifest(format!("catalog is not a mapping: {}", path.display()))
    })?;
    mapping.insert(
        YamlValue::String("version".to_string()),
        YamlValue::String(version.to_string()),
    );

    fs::write(path, serde_yaml::to_string(&catalog)?)?;
    debug!("bumped catalog version");
    Ok(())
}

/// Resolve a dotted key path (`tool.nwave.public_version`) in a TOML file.
///
/// Strings are returned unquoted; other values in their TOML form.
pub fn read_toml_field(path: impl AsRef<Path>, dotted_key: &str) -> Result<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ReleaseTrainError::config(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let data: toml::Table = toml::from_str(&fs::read_to_string(path)?)?;
    let not_found = || ReleaseTrainError::key_not_found(dotted_key, path.display().to_string());

    let mut segments = dotted_key.split('.');
    let first = segments.next().ok_or_else(not_found)?;
    let mut current = data.get(first).ok_or_else(not_found)?;
    for segment in segments {
        current = current
            .as_table()
            .and_then(|table| table.get(segment))
            .ok_or_else(not_found)?;
    }

    Ok(match current {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = r#"[project]
name = "nwave"
version = "1.1.21"

[tool.nwave]
public_version_floor = "1.1.0"

[tool.semantic_release]
version_variable = "pyproject.toml:version"
"#;

    #[test]
    fn test_bump_pyproject_replaces_first_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "version = \"0.1.0\"\n[dep]\nversion = \"9.9.9\"\n").unwrap();

        bump_pyproject(&path, "1.1.23").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "version = \"1.1.23\"\n[dep]\nversion = \"9.9.9\"\n");
    }

    #[test]
    fn test_bump_pyproject_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = bump_pyproject(dir.path().join("nope.toml"), "1.0.0").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_bump_catalog_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framework-catalog.yaml");
        fs::write(&path, "name: nwave\nversion: 1.0.0\nagents:\n- a\n- b\n").unwrap();

        bump_catalog(&path, "1.1.23").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let name = content.find("name:").unwrap();
        let version = content.find("version:").unwrap();
        let agents = content.find("agents:").unwrap();
        assert!(name < version && version < agents);
        let parsed: YamlValue = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed["version"], YamlValue::String("1.1.23".to_string()));
    }

    #[test]
    fn test_bump_catalog_adds_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        fs::write(&path, "name: nwave\n").unwrap();

        bump_catalog(&path, "2.0.0").unwrap();

        let parsed: YamlValue = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["version"], YamlValue::String("2.0.0".to_string()));
    }

    #[test]
    fn test_read_toml_field_nested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, PYPROJECT).unwrap();

        assert_eq!(read_toml_field(&path, "project.version").unwrap(), "1.1.21");
        assert_eq!(
            read_toml_field(&path, "tool.nwave.public_version_floor").unwrap(),
            "1.1.0"
        );
    }

    #[test]
    fn test_read_toml_field_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, PYPROJECT).unwrap();

        for key in ["project.missing", "tool.nwave.public_version_floor.deeper", "nope"] {
            let err = read_toml_field(&path, key).unwrap_err();
            assert!(matches!(err, ReleaseTrainError::KeyNotFound { .. }), "{key}");
        }
    }

    #[test]
    fn test_read_toml_field_non_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[build]\njobs = 4\n").unwrap();

        assert_eq!(read_toml_field(&path, "build.jobs").unwrap(), "4");
    }
}
