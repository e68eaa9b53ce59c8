//! Indicator-dimension detection strategies.

use crate::cube::Dimension;

/// Strategy for locating the indicator dimension among structurally
/// anonymous cube dimensions.
///
/// The default [`LabelIntersection`] heuristic assumes no two dimensions
/// share indicator-like codes; dataset families where that assumption
/// breaks can inject their own detector instead.
pub trait DetectIndicator {
    /// Index of the indicator dimension, or `None` when no dimension
    /// matches (the transform then yields an empty result, not an error).
    fn detect(&self, dimensions: &[Dimension], targets: &[String]) -> Option<usize>;
}

/// Default heuristic: the first dimension whose label set intersects the
/// target-indicator allow-list.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelIntersection;

impl DetectIndicator for LabelIntersection {
    fn detect(&self, dimensions: &[Dimension], targets: &[String]) -> Option<usize> {
        dimensions
            .iter()
            .position(|dim| dim.labels_contain_any(targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dimension(id: &str, codes: &[&str]) -> Dimension {
        let index: HashMap<String, usize> = codes
            .iter()
            .enumerate()
            .map(|(position, code)| (code.to_string(), position))
            .collect();
        let labels: HashMap<String, String> = codes
            .iter()
            .map(|code| (code.to_string(), format!("label {code}")))
            .collect();
        Dimension::new(id, &index, labels).unwrap()
    }

    #[test]
    fn finds_first_dimension_with_matching_label() {
        let dims = vec![
            dimension("geo", &["DE", "FR"]),
            dimension("indic", &["GEP", "X"]),
        ];
        let detected = LabelIntersection.detect(&dims, &["GEP".to_string()]);
        assert_eq!(detected, Some(1));
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let dims = vec![dimension("geo", &["DE", "FR"])];
        let detected = LabelIntersection.detect(&dims, &["NON_EXISTENT".to_string()]);
        assert_eq!(detected, None);
    }
}
