//! Format-agnostic loading of specification documents.
//!
//! Each `Format` is registered under one or more filename extensions.
//! Loading a file picks the parser by extension and produces a `Spec`.

use std::path::{Path, PathBuf};

use crate::error::LoadError;

use super::Spec;

/// A registered serialization format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Every registered format, in order of preference.
    pub const ALL: [Format; 2] = [Format::Json, Format::Yaml];

    /// Filename extensions for this format, without the dot.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Json => &["json"],
            Format::Yaml => &["yaml", "yml"],
        }
    }

    /// Look up a format by filename extension, ignoring case.
    pub fn from_extension(extension: &str) -> Result<Self, LoadError> {
        let lowered = extension.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extensions().iter().any(|e| *e == lowered))
            .ok_or_else(|| {
                log::error!("no serialization format registered for \"{}\"", extension);
                LoadError::UnknownFormat(extension.to_string())
            })
    }

    /// Look up a format by the extension of a path.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_extension(extension)
    }
}

/// Parse a document in a known format.
pub fn parse_str(format: Format, text: &str) -> Result<Spec, LoadError> {
    let spec = match format {
        Format::Json => Spec::from(serde_json::from_str::<serde_json::Value>(text)?),
        Format::Yaml => Spec::from(serde_yaml::from_str::<serde_yaml::Value>(text)?),
    };
    Ok(spec)
}

/// Open and read the named file.
pub fn load_path(path: impl AsRef<Path>) -> Result<Spec, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    log::debug!("reading raw specifications from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_str(format, &text)
}

/// Find `<directory>/<base>.<extension>` for the first registered extension
/// that exists.
pub fn locate(directory: impl AsRef<Path>, base: &str) -> Result<PathBuf, LoadError> {
    let directory = directory.as_ref();
    Format::ALL
        .iter()
        .flat_map(|f| f.extensions().iter())
        .map(|extension| directory.join(format!("{}.{}", base, extension)))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| LoadError::NotFound(directory.join(base).display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("json").unwrap(), Format::Json);
        assert_eq!(Format::from_extension("YML").unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_extension("toml"),
            Err(LoadError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_parse_json() {
        let spec = parse_str(Format::Json, r#"{"a": {"copies": 2}}"#).unwrap();
        let copies = spec.as_map().and_then(|m| m.get("a")).and_then(Spec::as_map);
        assert_eq!(copies.and_then(|m| m.get("copies")).and_then(Spec::as_int), Some(2));
    }

    #[test]
    fn test_parse_yaml_sequence() {
        let spec = parse_str(Format::Yaml, "- title: a\n- title: b\n").unwrap();
        match spec {
            Spec::Seq(items) => assert_eq!(items.len(), 2),
            other => panic!("expected a sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_str(Format::Json, "{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_locate_and_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cards.yml"), "x: 1\n").unwrap();

        let path = locate(dir.path(), "cards").unwrap();
        assert!(path.ends_with("cards.yml"));

        let spec = load_path(&path).unwrap();
        assert_eq!(spec.as_map().and_then(|m| m.get("x")), Some(&Spec::Int(1)));

        assert!(matches!(locate(dir.path(), "missing"), Err(LoadError::NotFound(_))));
    }
}
