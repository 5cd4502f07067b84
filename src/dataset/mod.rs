//! In-memory representation of a labeled image dataset

mod catalog;
mod data;
mod dataset;
mod label;
mod segment;
mod stats;

pub use catalog::{AttributeInfo, AttributeType, Box2DSubcatalog, Catalog, CategoryInfo};
pub use data::Data;
pub use dataset::Dataset;
pub use label::{AttributeValue, Box2D, Label, LabeledBox2D};
pub use segment::Segment;
pub use stats::SegmentStats;
