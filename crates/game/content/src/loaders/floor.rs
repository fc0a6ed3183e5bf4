//! Floor template loader.

use std::path::Path;

use tower_core::FloorTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for floor templates from RON files.
///
/// RON format: a [`FloorTemplate`] with one grid per layer.
///
/// ```ron
/// (
///     floor_id: "MT1",
///     title: Some("Tower 1F"),
///     event_layer: 1,
///     map: {
///         0: [[1, 1, 1], [1, 0, 1]],
///         1: [[0, 201, 0], [0, 0, 0]],
///     },
/// )
/// ```
pub struct FloorLoader;

impl FloorLoader {
    /// Load one floor template.
    ///
    /// The file stem must match the declared `floor_id` so lookups by id find
    /// the right file. Grid shape is validated later by `Floor::new`.
    pub fn load(path: &Path) -> LoadResult<FloorTemplate> {
        let content = read_file(path)?;
        let template: FloorTemplate = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse floor RON {}: {}", path.display(), e))?;

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            && stem != template.floor_id.as_str()
        {
            anyhow::bail!(
                "Floor file {} declares id '{}'",
                path.display(),
                template.floor_id
            );
        }

        Ok(template)
    }
}
