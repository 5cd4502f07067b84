use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::label::Label;
use crate::error::{LoadError, LoadResult};

/// One image of a segment together with its label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub path: PathBuf,
    #[serde(default)]
    pub label: Label,
    /// Width and height as declared by the annotation file, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_size: Option<(u32, u32)>,
}

impl Data {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label: Label::default(),
            declared_size: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub fn declared_size(&self) -> Option<(u32, u32)> {
        self.declared_size
    }

    /// Read the image header and return its (width, height)
    pub fn dimensions(&self) -> LoadResult<(u32, u32)> {
        image::image_dimensions(&self.path).map_err(|source| LoadError::Image {
            path: self.path.clone(),
            source,
        })
    }

    /// Decode the full image
    pub fn open_image(&self) -> LoadResult<DynamicImage> {
        image::open(&self.path).map_err(|source| LoadError::Image {
            path: self.path.clone(),
            source,
        })
    }
}
