//! Mixed-radix flat-index decoding.
//!
//! The upstream provider packs an N-dimensional cell address into a single
//! integer with the last listed dimension varying fastest (row-major order
//! relative to the dimension list). That ordering is an external contract,
//! not something the data itself can confirm; [`verify_round_trip`] lets
//! callers cross-check it at startup instead of trusting it silently.

use crate::error::{CubecastError, Result};

/// Total number of addressable cells for a list of dimension sizes.
pub fn cube_capacity(sizes: &[usize]) -> u64 {
    sizes.iter().map(|&s| s as u64).product()
}

/// Decode a flat index into per-dimension positions, in dimension order.
///
/// Processes sizes in reverse: at each step the coordinate is
/// `index % size` and the index shrinks by `index / size`. An index at or
/// beyond the cube capacity signals a corrupt cube and is a hard error,
/// never a silent wrap.
pub fn decode_flat_index(index: u64, sizes: &[usize]) -> Result<Vec<usize>> {
    let capacity = cube_capacity(sizes);
    if index >= capacity {
        return Err(CubecastError::FlatIndexOutOfRange { index, capacity });
    }

    let mut remainder = index;
    let mut coords = Vec::with_capacity(sizes.len());
    for &size in sizes.iter().rev() {
        coords.push((remainder % size as u64) as usize);
        remainder /= size as u64;
    }
    coords.reverse();
    Ok(coords)
}

/// Re-encode per-dimension positions into a flat index.
///
/// Inverse of [`decode_flat_index`]; used for the round-trip cross-check.
pub fn encode_coordinate(coords: &[usize], sizes: &[usize]) -> Result<u64> {
    if coords.len() != sizes.len() {
        return Err(CubecastError::CoordinateMismatch {
            expected: sizes.len(),
            got: coords.len(),
        });
    }

    let mut index = 0u64;
    for (dimension, (&position, &size)) in coords.iter().zip(sizes).enumerate() {
        if position >= size {
            return Err(CubecastError::PositionOutOfRange {
                dimension,
                position,
                size,
            });
        }
        index = index * size as u64 + position as u64;
    }
    Ok(index)
}

/// Startup sanity check for the packing convention.
///
/// Re-encodes the decoded coordinate for a spread of indices across the
/// cube's address space (every index for small cubes, an even stride plus
/// both boundaries otherwise) and fails on the first mismatch.
pub fn verify_round_trip(sizes: &[usize]) -> Result<()> {
    const EXHAUSTIVE_LIMIT: u64 = 1 << 12;
    const SAMPLES: u64 = 256;

    let capacity = cube_capacity(sizes);
    if capacity == 0 {
        return Ok(());
    }

    let mut check = |index: u64| -> Result<()> {
        let coords = decode_flat_index(index, sizes)?;
        let encoded = encode_coordinate(&coords, sizes)?;
        if encoded != index {
            return Err(CubecastError::FlatIndexOutOfRange {
                index: encoded,
                capacity,
            });
        }
        Ok(())
    };

    if capacity <= EXHAUSTIVE_LIMIT {
        for index in 0..capacity {
            check(index)?;
        }
    } else {
        let stride = capacity / SAMPLES;
        for step in 0..SAMPLES {
            check(step * stride)?;
        }
        check(capacity - 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_zero_to_origin() {
        let sizes = [2, 2, 2, 1];
        assert_eq!(decode_flat_index(0, &sizes).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn decodes_last_index_to_far_corner() {
        let sizes = [2, 2, 2, 1];
        assert_eq!(decode_flat_index(7, &sizes).unwrap(), vec![1, 1, 1, 0]);

        let sizes = [3, 4, 5];
        assert_eq!(decode_flat_index(59, &sizes).unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn last_dimension_varies_fastest() {
        let sizes = [2, 3];
        assert_eq!(decode_flat_index(1, &sizes).unwrap(), vec![0, 1]);
        assert_eq!(decode_flat_index(2, &sizes).unwrap(), vec![0, 2]);
        assert_eq!(decode_flat_index(3, &sizes).unwrap(), vec![1, 0]);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let sizes = [2, 2, 2, 1];
        assert_eq!(
            decode_flat_index(8, &sizes),
            Err(CubecastError::FlatIndexOutOfRange {
                index: 8,
                capacity: 8
            })
        );
    }

    #[test]
    fn encode_inverts_decode() {
        let sizes = [3, 1, 4];
        for index in 0..cube_capacity(&sizes) {
            let coords = decode_flat_index(index, &sizes).unwrap();
            assert_eq!(encode_coordinate(&coords, &sizes).unwrap(), index);
        }
    }

    #[test]
    fn encode_rejects_bad_coordinates() {
        assert!(matches!(
            encode_coordinate(&[0, 0], &[2, 2, 2]),
            Err(CubecastError::CoordinateMismatch { .. })
        ));
        assert!(matches!(
            encode_coordinate(&[0, 5], &[2, 2]),
            Err(CubecastError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn round_trip_check_passes_for_valid_sizes() {
        verify_round_trip(&[2, 2, 2, 1]).unwrap();
        verify_round_trip(&[7, 11, 13, 17]).unwrap();
        verify_round_trip(&[]).unwrap();
    }
}
