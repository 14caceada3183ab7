//! Catalog loading.
//!
//! A catalog is the ordered list of [`ApiDescriptor`]s read from one file.
//! It is rebuilt from disk on every call; nothing is cached or written back.
//!
//! # File resolution
//!
//! An explicit path is always used as given. Otherwise the loader looks in
//! its default directory (`~/.apicli`, or the configured catalog directory)
//! for `apicli.toml`, then `apis.txt`, and takes the first that exists. When
//! neither exists the catalog is empty; that is not an error.
//!
//! Files ending in `.toml` are read with the [structured format](toml_adapter);
//! anything else uses the [tabular format](txt).

pub mod toml_adapter;
pub mod txt;

pub use toml_adapter::parse_toml_catalog;
pub use txt::{parse_txt, tokenize_row, try_parse_json_or_keep};

use crate::config::ApiCliConfig;
use crate::models::ApiDescriptor;
use crate::variables::ProcessEnv;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default catalog file names, in order of preference.
pub const CATALOG_FILE_NAMES: &[&str] = &["apicli.toml", "apis.txt"];

/// Directory under the home directory that holds the default catalog.
pub const CATALOG_DIR_NAME: &str = ".apicli";

/// Errors that can occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The structured catalog is not valid TOML.
    #[error("Failed to parse catalog {path}: {message}")]
    Toml { path: PathBuf, message: String },
}

/// Locates and loads catalog files.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    default_dir: Option<PathBuf>,
}

impl CatalogLoader {
    /// Creates a loader whose default files live in `default_dir`.
    ///
    /// With `None`, only explicit paths can be loaded.
    pub fn new(default_dir: Option<PathBuf>) -> Self {
        Self { default_dir }
    }

    /// A loader over `~/.apicli`.
    pub fn from_home() -> Self {
        Self::new(dirs::home_dir().map(|home| home.join(CATALOG_DIR_NAME)))
    }

    /// A loader over the configured catalog directory, or `~/.apicli`.
    pub fn from_config(config: &ApiCliConfig) -> Self {
        match &config.catalog_dir {
            Some(dir) => Self::new(Some(dir.clone())),
            None => Self::from_home(),
        }
    }

    pub fn default_dir(&self) -> Option<&Path> {
        self.default_dir.as_deref()
    }

    /// The candidate default catalog paths, in lookup order.
    pub fn default_paths(&self) -> Vec<PathBuf> {
        self.default_dir
            .iter()
            .flat_map(|dir| CATALOG_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .collect()
    }

    /// Returns the file a load would read, or `None` if there is none.
    ///
    /// An explicit path is returned as-is, whether or not it exists.
    pub fn locate(&self, config_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = config_path {
            return Some(path.to_path_buf());
        }
        self.default_paths().into_iter().find(|p| p.is_file())
    }

    /// Loads the catalog.
    ///
    /// # Errors
    ///
    /// Fails if the resolved file cannot be read or, for TOML, parsed. A
    /// missing default catalog yields `Ok` with an empty list.
    pub fn get_apis(&self, config_path: Option<&Path>) -> Result<Vec<ApiDescriptor>, CatalogError> {
        match self.locate(config_path) {
            Some(path) => load_catalog_file(&path),
            None => {
                debug!("No catalog file found, using an empty catalog");
                Ok(Vec::new())
            }
        }
    }

    /// Returns the first entry identified by `(service, name)`.
    pub fn get_api(
        &self,
        service: &str,
        name: &str,
        config_path: Option<&Path>,
    ) -> Result<Option<ApiDescriptor>, CatalogError> {
        Ok(find_api(self.get_apis(config_path)?, service, name))
    }
}

/// Reads and parses one catalog file, picking the format by extension.
pub fn load_catalog_file(path: &Path) -> Result<Vec<ApiDescriptor>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let apis = if is_toml_path(path) {
        parse_toml_catalog(&content).map_err(|e| CatalogError::Toml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        parse_txt(&content)
    };

    debug!("Loaded {} APIs from {}", apis.len(), path.display());
    Ok(apis)
}

fn is_toml_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

/// Takes the first entry matching `(service, name)`, in catalog order.
pub fn find_api(
    apis: impl IntoIterator<Item = ApiDescriptor>,
    service: &str,
    name: &str,
) -> Option<ApiDescriptor> {
    apis.into_iter().find(|api| api.matches(service, name))
}

/// Keeps the entries whose `service.name` id contains `pattern`.
///
/// An empty pattern keeps everything.
pub fn filter_apis<'a>(apis: &'a [ApiDescriptor], pattern: &str) -> Vec<&'a ApiDescriptor> {
    apis.iter().filter(|api| api.id().contains(pattern)).collect()
}

/// Loads the catalog using the process environment's configuration.
///
/// See [`CatalogLoader::get_apis`].
pub fn get_apis(config_path: Option<&Path>) -> Result<Vec<ApiDescriptor>, CatalogError> {
    CatalogLoader::from_config(&ApiCliConfig::from_env(&ProcessEnv)).get_apis(config_path)
}

/// Returns the first catalog entry for `(service, name)`, if any.
pub fn get_api(
    service: &str,
    name: &str,
    config_path: Option<&Path>,
) -> Result<Option<ApiDescriptor>, CatalogError> {
    CatalogLoader::from_config(&ApiCliConfig::from_env(&ProcessEnv))
        .get_api(service, name, config_path)
}
