//! Curated monthly dataset adapter

pub mod dataset;

pub use dataset::{parse_curated, CuratedDataset};
