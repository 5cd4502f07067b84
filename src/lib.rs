//! Loader for the NightOwls night-time pedestrian detection dataset.
//!
//! ```no_run
//! use nightowls_dataset::opendataset::NightOwls;
//!
//! let owls = NightOwls::load("~/data/NightOwls")?;
//! for segment in &owls {
//!     println!("{}: {} images", segment.name(), segment.len());
//! }
//! # Ok::<(), nightowls_dataset::LoadError>(())
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod opendataset;

pub use error::{LoadError, LoadResult};
