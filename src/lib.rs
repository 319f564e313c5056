//! Split a GeoJSON feature collection into two halves.

pub mod error;
pub mod splitter;

pub use error::{Result, SplitError};
pub use splitter::{split, FeatureCollectionPart, SplitConfig, SplitReport};
