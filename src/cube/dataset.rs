//! Upstream dataset payload and the validated cube built from it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::cube::decoder::cube_capacity;
use crate::cube::dimension::Dimension;
use crate::error::{CubecastError, Result};

/// Category block of one upstream dimension: code-to-label and
/// code-to-position maps.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    /// Display labels; may be absent or partial.
    #[serde(default)]
    pub label: HashMap<String, String>,
    /// Declared category ordering.
    pub index: HashMap<String, usize>,
}

/// One upstream dimension description.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDimension {
    pub category: RawCategory,
}

/// Mirror of the upstream dataset payload.
///
/// Field presence follows the provider contract: `dimension`, `size` and
/// `value` are required (a payload missing any of them fails to
/// deserialize and the caller skips that dataset), while `id` defaults to
/// the order in which dimensions appear in the `dimension` map.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDataset {
    /// Dimension descriptions in declaration order.
    #[serde(deserialize_with = "ordered_dimension_map")]
    pub dimension: Vec<(String, RawDimension)>,
    /// Ordered dimension id list; optional upstream.
    #[serde(default)]
    pub id: Option<Vec<String>>,
    /// Per-dimension sizes matching the id order.
    pub size: Vec<usize>,
    /// Sparse cells: decimal-string flat index to raw value (number or
    /// sentinel string such as ":").
    pub value: BTreeMap<String, Value>,
}

/// Deserialize a JSON object into a Vec preserving key order, so an absent
/// `id` list can fall back to declaration order.
fn ordered_dimension_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, RawDimension)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedMap;

    impl<'de> Visitor<'de> for OrderedMap {
        type Value = Vec<(String, RawDimension)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of dimension id to dimension description")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedMap)
}

/// A structurally validated data cube.
///
/// Dimensions are held in `id` order with their declared category
/// orderings; the sparse value map keeps its raw cells for the transformer
/// to parse entry by entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    dataset_code: String,
    dims: Vec<Dimension>,
    sizes: Vec<usize>,
    values: BTreeMap<String, Value>,
}

impl Cube {
    /// Validate an upstream payload into a cube.
    ///
    /// Hard failures: `id`/`size` length mismatch, an id without a
    /// dimension entry, a declared size disagreeing with the category
    /// count, or category positions that are not a contiguous permutation.
    pub fn from_raw(dataset_code: &str, raw: &RawDataset) -> Result<Self> {
        let dim_ids: Vec<String> = match &raw.id {
            Some(ids) => ids.clone(),
            None => raw.dimension.iter().map(|(id, _)| id.clone()).collect(),
        };

        if dim_ids.len() != raw.size.len() {
            return Err(CubecastError::SizeMismatch {
                dataset: dataset_code.to_string(),
                ids: dim_ids.len(),
                sizes: raw.size.len(),
            });
        }

        let mut dims = Vec::with_capacity(dim_ids.len());
        for (dim_id, &declared) in dim_ids.iter().zip(&raw.size) {
            let raw_dim = raw
                .dimension
                .iter()
                .find(|(id, _)| id == dim_id)
                .map(|(_, dim)| dim)
                .ok_or_else(|| CubecastError::MissingDimension {
                    dataset: dataset_code.to_string(),
                    dimension: dim_id.clone(),
                })?;

            let dim = Dimension::new(
                dim_id.clone(),
                &raw_dim.category.index,
                raw_dim.category.label.clone(),
            )?;

            if dim.size() != declared {
                return Err(CubecastError::CategoryCountMismatch {
                    dataset: dataset_code.to_string(),
                    dimension: dim_id.clone(),
                    declared,
                    categories: dim.size(),
                });
            }
            dims.push(dim);
        }

        Ok(Self {
            dataset_code: dataset_code.to_string(),
            dims,
            sizes: raw.size.clone(),
            values: raw.value.clone(),
        })
    }

    pub fn dataset_code(&self) -> &str {
        &self.dataset_code
    }

    /// Dimensions in `id` order.
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// Per-dimension sizes in `id` order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Sparse cells keyed by decimal-string flat index.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Total addressable cells.
    pub fn capacity(&self) -> u64 {
        cube_capacity(&self.sizes)
    }

    /// Position and dimension for an id, if present.
    pub fn dimension(&self, id: &str) -> Option<(usize, &Dimension)> {
        self.dims
            .iter()
            .enumerate()
            .find(|(_, dim)| dim.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_payload() -> Value {
        json!({
            "dimension": {
                "geo": {"category": {
                    "label": {"DE": "Germany", "FR": "France"},
                    "index": {"DE": 0, "FR": 1}
                }},
                "time": {"category": {
                    "label": {"2020": "2020", "2021": "2021"},
                    "index": {"2020": 0, "2021": 1}
                }},
                "indic": {"category": {
                    "label": {"GEP": "Gross Production", "X": "Other"},
                    "index": {"GEP": 0, "X": 1}
                }},
                "unit": {"category": {
                    "label": {"GWH": "Gigawatt-hour"},
                    "index": {"GWH": 0}
                }}
            },
            "id": ["geo", "time", "indic", "unit"],
            "size": [2, 2, 2, 1],
            "value": {"0": "100.5", "1": ":", "4": 150.2}
        })
    }

    #[test]
    fn deserializes_and_validates_payload() {
        let raw: RawDataset = serde_json::from_value(mock_payload()).unwrap();
        let cube = Cube::from_raw("test_ds", &raw).unwrap();

        assert_eq!(cube.sizes(), &[2, 2, 2, 1]);
        assert_eq!(cube.capacity(), 8);
        assert_eq!(cube.dims()[0].id(), "geo");
        assert_eq!(cube.values().len(), 3);

        let (position, dim) = cube.dimension("indic").unwrap();
        assert_eq!(position, 2);
        assert_eq!(dim.code(1), "X");
    }

    #[test]
    fn id_defaults_to_dimension_declaration_order() {
        let mut payload = mock_payload();
        payload.as_object_mut().unwrap().remove("id");

        let raw: RawDataset = serde_json::from_value(payload).unwrap();
        let cube = Cube::from_raw("test_ds", &raw).unwrap();

        let ids: Vec<&str> = cube.dims().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["geo", "time", "indic", "unit"]);
    }

    #[test]
    fn missing_required_key_fails_deserialization() {
        let mut payload = mock_payload();
        payload.as_object_mut().unwrap().remove("value");
        assert!(serde_json::from_value::<RawDataset>(payload).is_err());
    }

    #[test]
    fn id_size_mismatch_is_a_hard_error() {
        let mut payload = mock_payload();
        payload["size"] = json!([2, 2, 2]);

        let raw: RawDataset = serde_json::from_value(payload).unwrap();
        assert_eq!(
            Cube::from_raw("test_ds", &raw),
            Err(CubecastError::SizeMismatch {
                dataset: "test_ds".to_string(),
                ids: 4,
                sizes: 3,
            })
        );
    }

    #[test]
    fn declared_size_must_match_category_count() {
        let mut payload = mock_payload();
        payload["size"] = json!([2, 2, 2, 3]);

        let raw: RawDataset = serde_json::from_value(payload).unwrap();
        assert!(matches!(
            Cube::from_raw("test_ds", &raw),
            Err(CubecastError::CategoryCountMismatch { .. })
        ));
    }

    #[test]
    fn unknown_id_is_a_hard_error() {
        let mut payload = mock_payload();
        payload["id"] = json!(["geo", "time", "indic", "nope"]);

        let raw: RawDataset = serde_json::from_value(payload).unwrap();
        assert!(matches!(
            Cube::from_raw("test_ds", &raw),
            Err(CubecastError::MissingDimension { .. })
        ));
    }
}
