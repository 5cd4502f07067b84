use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::catalog::Catalog;
use super::segment::Segment;

/// A named dataset made of segments that share one catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    name: String,
    catalog: Catalog,
    segments: Vec<Segment>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: Catalog::default(),
            segments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Append an empty segment and return it for filling.
    /// An existing segment with the same name is replaced.
    pub fn create_segment(&mut self, name: &str) -> &mut Segment {
        self.segments.retain(|s| s.name != name);
        self.segments.push(Segment::new(name));
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_names(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.name()).collect()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of data across all segments
    pub fn total_data(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }
}

impl Index<usize> for Dataset {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.segments[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Data;

    #[test]
    fn test_new_dataset_is_empty() {
        let dataset = Dataset::new("NightOwls");
        assert_eq!(dataset.name(), "NightOwls");
        assert!(dataset.is_empty());
        assert_eq!(dataset.total_data(), 0);
        assert!(dataset.catalog().box2d().is_none());
    }

    #[test]
    fn test_create_segment() {
        let mut dataset = Dataset::new("NightOwls");
        dataset.create_segment("training").push(Data::new("/a.png"));
        dataset.create_segment("validation");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.segment_names(), vec!["training", "validation"]);
        assert_eq!(dataset.segment("training").map(Segment::len), Some(1));
        assert_eq!(dataset[1].name(), "validation");
        assert_eq!(dataset.total_data(), 1);
        assert!(dataset.segment("testing").is_none());
    }

    #[test]
    fn test_create_segment_replaces_existing() {
        let mut dataset = Dataset::new("NightOwls");
        dataset.create_segment("training").push(Data::new("/a.png"));
        dataset.create_segment("training");

        assert_eq!(dataset.len(), 1);
        assert!(dataset[0].is_empty());
    }
}
