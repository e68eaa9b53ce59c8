//! Dimension catalog: ordered category codes and display labels.

use std::collections::HashMap;

use crate::error::{CubecastError, Result};

/// One categorical axis of a data cube.
///
/// Holds the category codes in their declared order (position 0 first) and
/// the code-to-label map. Construction validates that the declared positions
/// form a contiguous permutation of `[0, size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    id: String,
    /// Category codes ordered by declared position.
    codes: Vec<String>,
    labels: HashMap<String, String>,
}

impl Dimension {
    /// Build a dimension from its declared code-to-position and
    /// code-to-label maps.
    pub fn new(
        id: impl Into<String>,
        index: &HashMap<String, usize>,
        labels: HashMap<String, String>,
    ) -> Result<Self> {
        let id = id.into();
        let size = index.len();
        let mut codes: Vec<Option<String>> = vec![None; size];

        for (code, &position) in index {
            if position >= size {
                return Err(CubecastError::InvalidCategoryIndex {
                    dimension: id,
                    detail: format!("position {position} out of range for {size} categories"),
                });
            }
            if codes[position].is_some() {
                return Err(CubecastError::InvalidCategoryIndex {
                    dimension: id,
                    detail: format!("duplicate position {position}"),
                });
            }
            codes[position] = Some(code.clone());
        }

        // size entries, each position unique and < size, so every slot is
        // filled; the collect is for the type, not a reachable failure.
        let codes = codes
            .into_iter()
            .enumerate()
            .map(|(position, code)| {
                code.ok_or_else(|| CubecastError::InvalidCategoryIndex {
                    dimension: String::new(),
                    detail: format!("position {position} unassigned"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { id, codes, labels })
    }

    /// Dimension identifier (e.g. `geo`, `time`, `unit`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of categories.
    pub fn size(&self) -> usize {
        self.codes.len()
    }

    /// Category code at a decoded position.
    ///
    /// Positions come from the flat-index decoder, which never produces a
    /// value outside `[0, size)` for a validated cube.
    pub fn code(&self, position: usize) -> &str {
        &self.codes[position]
    }

    /// Display label for a category code, if declared.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    /// Display label with the code itself as fallback.
    pub fn label_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.label(code).unwrap_or(code)
    }

    /// Whether any of the given codes appears in this dimension's label set.
    ///
    /// This is the indicator-detection probe: the label map, not the index
    /// map, is consulted, matching the upstream convention.
    pub fn labels_contain_any(&self, codes: &[String]) -> bool {
        codes.iter().any(|code| self.labels.contains_key(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs
            .iter()
            .map(|(code, position)| (code.to_string(), *position))
            .collect()
    }

    fn labels_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect()
    }

    #[test]
    fn orders_codes_by_declared_position() {
        let dim = Dimension::new(
            "geo",
            &index_of(&[("FR", 1), ("DE", 0)]),
            labels_of(&[("DE", "Germany"), ("FR", "France")]),
        )
        .unwrap();

        assert_eq!(dim.size(), 2);
        assert_eq!(dim.code(0), "DE");
        assert_eq!(dim.code(1), "FR");
        assert_eq!(dim.label("DE"), Some("Germany"));
        assert_eq!(dim.label_or_code("XX"), "XX");
    }

    #[test]
    fn rejects_non_contiguous_positions() {
        let result = Dimension::new("geo", &index_of(&[("DE", 0), ("FR", 2)]), HashMap::new());
        assert!(matches!(
            result,
            Err(CubecastError::InvalidCategoryIndex { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_positions() {
        let result = Dimension::new("geo", &index_of(&[("DE", 0), ("FR", 0)]), HashMap::new());
        assert!(matches!(
            result,
            Err(CubecastError::InvalidCategoryIndex { .. })
        ));
    }

    #[test]
    fn label_probe_checks_label_keys() {
        let dim = Dimension::new(
            "indic",
            &index_of(&[("GEP", 0), ("X", 1)]),
            labels_of(&[("GEP", "Gross Production")]),
        )
        .unwrap();

        assert!(dim.labels_contain_any(&["GEP".to_string()]));
        // "X" has an index entry but no label, so the probe misses it.
        assert!(!dim.labels_contain_any(&["X".to_string()]));
    }
}
