use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::catalog::Catalog;
use super::data::Data;
use super::stats::SegmentStats;

/// A named, ordered collection of data (e.g. "training")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    data: Vec<Data>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, data: Data) {
        self.data.push(data);
    }

    pub fn get(&self, index: usize) -> Option<&Data> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Data> {
        self.data.iter()
    }

    /// Sort data by path for consistent ordering
    pub fn sort_by_path(&mut self) {
        self.data.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Data with at least one box of the given category
    pub fn with_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Data> + 'a {
        self.data
            .iter()
            .filter(move |d| d.label.boxes().iter().any(|b| b.category == category))
    }

    /// Random sample without replacement, reproducible when a seed is given
    pub fn sample(&self, count: usize, seed: Option<u64>) -> Vec<&Data> {
        match seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.data.choose_multiple(&mut rng, count).collect()
            }
            None => {
                let mut rng = rand::thread_rng();
                self.data.choose_multiple(&mut rng, count).collect()
            }
        }
    }

    pub fn statistics(&self, catalog: &Catalog) -> SegmentStats {
        SegmentStats::collect(self, catalog)
    }
}

impl Index<usize> for Segment {
    type Output = Data;

    fn index(&self, index: usize) -> &Data {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a Segment {
    type Item = &'a Data;
    type IntoIter = std::slice::Iter<'a, Data>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Box2D, LabeledBox2D};

    fn create_test_segment(count: usize) -> Segment {
        let mut segment = Segment::new("training");
        for i in 0..count {
            let mut data = Data::new(format!("/images/{:03}.png", i));
            let category = if i % 2 == 0 { "pedestrian" } else { "ignore" };
            data.label.box2d = Some(vec![LabeledBox2D::new(
                Box2D::from_xywh(0.0, 0.0, 10.0, 20.0),
                category,
            )]);
            segment.push(data);
        }
        segment
    }

    #[test]
    fn test_new_segment_is_empty() {
        let segment = Segment::new("validation");
        assert_eq!(segment.name(), "validation");
        assert!(segment.is_empty());
        assert!(segment.get(0).is_none());
    }

    #[test]
    fn test_index_and_iter() {
        let segment = create_test_segment(3);
        assert_eq!(segment.len(), 3);
        assert_eq!(segment[1].file_name(), Some("001.png"));
        assert_eq!((&segment).into_iter().count(), 3);
    }

    #[test]
    fn test_sort_by_path() {
        let mut segment = Segment::new("testing");
        segment.push(Data::new("/images/b.png"));
        segment.push(Data::new("/images/a.png"));
        segment.sort_by_path();
        assert_eq!(segment[0].file_name(), Some("a.png"));
    }

    #[test]
    fn test_with_category() {
        let segment = create_test_segment(5);
        assert_eq!(segment.with_category("pedestrian").count(), 3);
        assert_eq!(segment.with_category("ignore").count(), 2);
        assert_eq!(segment.with_category("bicycledriver").count(), 0);
    }

    #[test]
    fn test_seeded_sample_is_reproducible() {
        let segment = create_test_segment(20);
        let first: Vec<_> = segment.sample(5, Some(7)).iter().map(|d| d.path.clone()).collect();
        let second: Vec<_> = segment.sample(5, Some(7)).iter().map(|d| d.path.clone()).collect();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_sample_larger_than_segment() {
        let segment = create_test_segment(3);
        assert_eq!(segment.sample(10, None).len(), 3);
    }
}
