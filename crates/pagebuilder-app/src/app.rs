//! Native application: a builder session persisted to a project directory.

use kurbo::{Point, Size};
use pagebuilder_core::inspector;
use pagebuilder_core::storage::{FileStorage, create_default_storage};
use pagebuilder_core::{
    Builder, BuilderConfig, ConfigError, Element, ElementId, ExportArtifact, StorageError,
    StoreError,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No element with id {0}")]
    UnknownElement(String),
    #[error("Element {0} has no text content")]
    NoText(String),
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where the app reads its config and keeps projects.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// JSON config file. Defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Project directory. Defaults to the platform data directory.
    pub storage_dir: Option<PathBuf>,
}

/// One row of a project listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSummary {
    pub id: ElementId,
    pub tag: String,
    pub depth: usize,
    pub origin: Point,
    pub size: Size,
}

pub struct App {
    builder: Builder,
}

impl App {
    /// Open the saved project (or an empty one).
    pub fn open(config: AppConfig) -> Result<Self, AppError> {
        let builder_config = match &config.config_path {
            Some(path) => BuilderConfig::load(path)?,
            None => BuilderConfig::default(),
        };
        let storage = match config.storage_dir {
            Some(dir) => FileStorage::new(dir)?,
            None => create_default_storage()?,
        };
        log::debug!("Project directory: {}", storage.base_path().display());

        let mut builder = Builder::new(builder_config, Box::new(storage));
        builder.restore()?;
        Ok(Self { builder })
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Add an element of type `tag` at `position` and save.
    pub fn add(&mut self, tag: &str, position: Point) -> Result<ElementId, AppError> {
        let id = self.builder.add_element(tag, position)?;
        self.builder.save()?;
        Ok(id)
    }

    /// Remove an element and save.
    pub fn remove(&mut self, id: &str) -> Result<(), AppError> {
        let id = ElementId::from(id);
        if !self.builder.store_mut().remove(&id) {
            return Err(AppError::UnknownElement(id.to_string()));
        }
        self.builder.save()?;
        Ok(())
    }

    /// Set (or clear, with an empty value) one style property and save.
    pub fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<bool, AppError> {
        let id = self.known(id)?;
        let changed = inspector::set_style(self.builder.store_mut(), &id, property, value);
        if changed {
            self.builder.save()?;
        }
        Ok(changed)
    }

    /// Replace an element's text content and save.
    pub fn set_text(&mut self, id: &str, text: &str) -> Result<(), AppError> {
        let id = self.known(id)?;
        let current = self.builder.store().get(&id).and_then(|e| e.kind.text_content());
        if current == Some(text) {
            return Ok(());
        }
        if !inspector::set_text(self.builder.store_mut(), &id, text) {
            return Err(AppError::NoText(id.to_string()));
        }
        self.builder.save()?;
        Ok(())
    }

    /// Replace the project with the contents of a JSON file and save.
    pub fn import(&mut self, path: &Path) -> Result<usize, AppError> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.builder.store_mut().load_project_json(&json)?;
        self.builder.save()?;
        Ok(self.builder.store().document().len())
    }

    /// Render the project as code.
    pub fn export(&self) -> ExportArtifact {
        self.builder.export()
    }

    /// Write the exported component into `dir`, returning the file path.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let artifact = self.export();
        let path = dir.join(&artifact.file_name);
        std::fs::write(&path, artifact.contents).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Every element in document order, nested ones after their parent.
    pub fn summary(&self) -> Vec<ElementSummary> {
        let default_size = self.builder.config().default_size();
        let mut rows = Vec::new();
        for element in self.builder.store().elements() {
            collect(element, 0, default_size, &mut rows);
        }
        rows
    }

    fn known(&self, id: &str) -> Result<ElementId, AppError> {
        let id = ElementId::from(id);
        match self.builder.store().get(&id) {
            Some(_) => Ok(id),
            None => Err(AppError::UnknownElement(id.to_string())),
        }
    }
}

fn collect(element: &Element, depth: usize, default_size: Size, rows: &mut Vec<ElementSummary>) {
    let bounds = element.bounds(default_size);
    rows.push(ElementSummary {
        id: element.id.clone(),
        tag: element.tag().to_string(),
        depth,
        origin: bounds.origin(),
        size: bounds.size(),
    });
    for child in &element.children {
        collect(child, depth + 1, default_size, rows);
    }
}
