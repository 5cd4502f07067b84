use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::catalog::Catalog;
use super::segment::Segment;

/// Label statistics for a single segment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentStats {
    pub segment: String,
    pub total_images: usize,
    /// Images that carry a box2d label list (possibly empty)
    pub labeled_images: usize,
    /// Labeled images without any box
    pub background_images: usize,
    pub total_boxes: usize,
    pub per_category: BTreeMap<String, usize>,
    pub per_pose: BTreeMap<String, usize>,
    pub occluded: usize,
    pub truncated: usize,
    pub difficult: usize,
    /// Distinct tracking instances
    pub tracks: usize,
}

impl SegmentStats {
    pub fn collect(segment: &Segment, catalog: &Catalog) -> Self {
        let mut stats = SegmentStats {
            segment: segment.name().to_string(),
            ..Default::default()
        };
        for name in catalog.category_names() {
            stats.per_category.insert(name.to_string(), 0);
        }

        let mut tracks = BTreeSet::new();
        for data in segment {
            stats.total_images += 1;
            let Some(boxes) = data.label.box2d.as_ref() else {
                continue;
            };

            stats.labeled_images += 1;
            if boxes.is_empty() {
                stats.background_images += 1;
            }

            for labeled in boxes {
                stats.total_boxes += 1;
                *stats.per_category.entry(labeled.category.clone()).or_insert(0) += 1;
                if let Some(pose) = labeled.pose() {
                    *stats.per_pose.entry(pose.to_string()).or_insert(0) += 1;
                }
                if labeled.is_occluded() {
                    stats.occluded += 1;
                }
                if labeled.is_truncated() {
                    stats.truncated += 1;
                }
                if labeled.is_difficult() {
                    stats.difficult += 1;
                }
                if let Some(instance) = &labeled.instance {
                    tracks.insert(instance.as_str());
                }
            }
        }
        stats.tracks = tracks.len();
        stats
    }

    pub fn category_count(&self, category: &str) -> usize {
        self.per_category.get(category).copied().unwrap_or(0)
    }

    /// Share of boxes belonging to a category, in percent
    pub fn category_percentage(&self, category: &str) -> f32 {
        if self.total_boxes == 0 {
            return 0.0;
        }
        (self.category_count(category) as f32 / self.total_boxes as f32) * 100.0
    }
}
