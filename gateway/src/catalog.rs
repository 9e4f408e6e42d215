//! Model catalog loaded from a declarative JSON file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Static record describing how to invoke one named model.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub id: String,
    /// Container image that runs the model.
    pub image: String,
    /// Host path to the model weights; its parent directory is mounted
    /// read-only into the container at /models.
    pub model_path: PathBuf,
    pub default_temperature: f32,
    pub max_tokens: u32,
}

/// One entry of the catalog file, keyed by model id.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    image: String,
    model_path: PathBuf,
    #[serde(default = "default_temperature")]
    default_temperature: f32,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    models: HashMap<String, CatalogEntry>,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}

/// In-memory table of model configurations, loaded once at startup and
/// immutable afterwards.
pub struct ModelCatalog {
    models: Vec<ModelConfig>,
}

impl ModelCatalog {
    /// Load the catalog from a JSON file.
    ///
    /// A missing or malformed file degrades to an empty catalog (every
    /// resolve then fails with `ModelNotFound`) instead of aborting startup.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let parsed: CatalogFile = match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Failed to load model catalog from {}: {}", path.display(), e);
                return Self { models: Vec::new() };
            }
        };

        let mut models: Vec<ModelConfig> = parsed
            .models
            .into_iter()
            .filter_map(|(id, entry)| {
                if !(0.0..=2.0).contains(&entry.default_temperature) || entry.max_tokens == 0 {
                    tracing::warn!("Skipping model {} with out-of-range defaults", id);
                    return None;
                }
                Some(ModelConfig {
                    id,
                    image: entry.image,
                    model_path: entry.model_path,
                    default_temperature: entry.default_temperature,
                    max_tokens: entry.max_tokens,
                })
            })
            .collect();
        models.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::info!("Loaded {} models from {}", models.len(), path.display());
        Self { models }
    }

    /// Build a catalog directly from model configurations.
    pub fn from_models(mut models: Vec<ModelConfig>) -> Self {
        models.sort_by(|a, b| a.id.cmp(&b.id));
        Self { models }
    }

    /// Look up a model by id.
    pub fn resolve(&self, model_id: &str) -> Result<&ModelConfig> {
        self.models
            .iter()
            .find(|m| m.id == model_id)
            .ok_or_else(|| Error::ModelNotFound(model_id.to_string()))
    }

    /// All models, in a stable id-sorted order.
    pub fn list(&self) -> &[ModelConfig] {
        &self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_catalog(
            r#"{
                "models": {
                    "smollm2": {
                        "image": "ai/smollm2",
                        "model_path": "/opt/models/smollm2.gguf",
                        "default_temperature": 0.5,
                        "max_tokens": 512
                    }
                }
            }"#,
        );
        let catalog = ModelCatalog::load(file.path());
        let model = catalog.resolve("smollm2").unwrap();
        assert_eq!(model.image, "ai/smollm2");
        assert_eq!(model.default_temperature, 0.5);
        assert_eq!(model.max_tokens, 512);
    }

    #[test]
    fn test_entry_defaults_applied() {
        let file = write_catalog(
            r#"{"models": {"m": {"image": "img", "model_path": "/m/weights.bin"}}}"#,
        );
        let catalog = ModelCatalog::load(file.path());
        let model = catalog.resolve("m").unwrap();
        assert_eq!(model.default_temperature, 0.7);
        assert_eq!(model.max_tokens, 2048);
    }

    #[test]
    fn test_missing_file_degrades_to_empty_catalog() {
        let catalog = ModelCatalog::load("/nonexistent/models.json");
        assert!(catalog.list().is_empty());
        assert!(matches!(
            catalog.resolve("anything"),
            Err(Error::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file_degrades_to_empty_catalog() {
        let file = write_catalog("{ not json");
        let catalog = ModelCatalog::load(file.path());
        assert!(catalog.list().is_empty());
    }

    #[test]
    fn test_out_of_range_entry_is_skipped() {
        let file = write_catalog(
            r#"{"models": {
                "bad": {"image": "img", "model_path": "/m", "default_temperature": 3.5},
                "good": {"image": "img", "model_path": "/m"}
            }}"#,
        );
        let catalog = ModelCatalog::load(file.path());
        assert_eq!(catalog.list().len(), 1);
        assert!(catalog.resolve("bad").is_err());
        assert!(catalog.resolve("good").is_ok());
    }

    #[test]
    fn test_list_is_stable_across_calls() {
        let catalog = ModelCatalog::from_models(vec![
            model("zeta"),
            model("alpha"),
            model("mid"),
        ]);
        let first: Vec<_> = catalog.list().iter().map(|m| m.id.clone()).collect();
        let second: Vec<_> = catalog.list().iter().map(|m| m.id.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["alpha", "mid", "zeta"]);
    }

    fn model(id: &str) -> ModelConfig {
        ModelConfig {
            id: id.to_string(),
            image: "img".to_string(),
            model_path: PathBuf::from("/m/weights.bin"),
            default_temperature: 0.7,
            max_tokens: 256,
        }
    }
}
