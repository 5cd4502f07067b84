use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{LoadError, LoadResult};

/// Contents of a `nightowls_<segment>.json` file
#[derive(Debug, Deserialize)]
pub(crate) struct AnnotationFile {
    pub images: Vec<ImageEntry>,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
    pub categories: Vec<NamedEntry>,
    #[serde(default)]
    pub poses: Vec<NamedEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageEntry {
    pub id: u64,
    pub file_name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnotationEntry {
    #[serde(default)]
    pub id: u64,
    pub image_id: u64,
    pub category_id: u64,
    pub bbox: Vec<f64>,
    #[serde(default)]
    pub occluded: bool,
    #[serde(default)]
    pub difficult: bool,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub ignore: bool,
    #[serde(default)]
    pub pose_id: Option<u64>,
    #[serde(default)]
    pub tracking_id: Option<u64>,
}

/// `{"id": .., "name": ..}` pairs used for categories and poses
#[derive(Debug, Deserialize)]
pub(crate) struct NamedEntry {
    pub id: u64,
    pub name: String,
}

impl AnnotationFile {
    pub fn read(path: &Path) -> LoadResult<Self> {
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn category_names(&self) -> HashMap<u64, &str> {
        self.categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect()
    }

    pub fn pose_names(&self) -> HashMap<u64, &str> {
        self.poses.iter().map(|p| (p.id, p.name.as_str())).collect()
    }

    /// Annotations grouped by the image they belong to, in file order
    pub fn annotations_by_image(&self) -> HashMap<u64, Vec<&AnnotationEntry>> {
        let mut grouped: HashMap<u64, Vec<&AnnotationEntry>> = HashMap::new();
        for annotation in &self.annotations {
            grouped.entry(annotation.image_id).or_default().push(annotation);
        }
        grouped
    }
}
