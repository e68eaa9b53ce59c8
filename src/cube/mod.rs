//! Sparse statistical data cubes.
//!
//! A cube is a set of categorical dimensions plus a sparse mapping from a
//! single flattened integer index to a raw cell value. This module holds the
//! upstream payload mirror ([`RawDataset`]), the validated [`Cube`], the
//! per-dimension catalog ([`Dimension`]), and the mixed-radix flat-index
//! decoder.

mod dataset;
mod decoder;
mod dimension;

pub use dataset::{Cube, RawCategory, RawDataset, RawDimension};
pub use decoder::{cube_capacity, decode_flat_index, encode_coordinate, verify_round_trip};
pub use dimension::Dimension;
