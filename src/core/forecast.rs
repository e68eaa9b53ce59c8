//! Forecast result types.

use serde::Serialize;

/// Model name reported when no forecast can be produced.
pub const NO_FORECAST_MODEL: &str = "No forecast (insufficient data)";

/// Which part of the combined output a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Historical,
    Forecast,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Historical => "historical",
            Segment::Forecast => "forecast",
        }
    }
}

/// One tagged point of the combined historical + forecast output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub value: f64,
    pub segment: Segment,
}

/// The selector's output: tagged points sorted ascending by year, plus the
/// winning model's name.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedForecast {
    pub points: Vec<ForecastPoint>,
    pub model: String,
}

impl SelectedForecast {
    /// The empty result returned for series too short to forecast.
    pub fn insufficient() -> Self {
        Self {
            points: Vec::new(),
            model: NO_FORECAST_MODEL.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in the historical segment.
    pub fn historical(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points
            .iter()
            .filter(|point| point.segment == Segment::Historical)
    }

    /// Points in the forecast segment.
    pub fn forecast(&self) -> impl Iterator<Item = &ForecastPoint> {
        self.points
            .iter()
            .filter(|point| point.segment == Segment::Forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_result_is_empty_with_sentinel_name() {
        let result = SelectedForecast::insufficient();
        assert!(result.is_empty());
        assert_eq!(result.model, "No forecast (insufficient data)");
    }

    #[test]
    fn segments_partition_the_points() {
        let result = SelectedForecast {
            points: vec![
                ForecastPoint {
                    year: 2020,
                    value: 1.0,
                    segment: Segment::Historical,
                },
                ForecastPoint {
                    year: 2021,
                    value: 2.0,
                    segment: Segment::Forecast,
                },
            ],
            model: "ExponentialSmoothing".to_string(),
        };

        assert_eq!(result.historical().count(), 1);
        assert_eq!(result.forecast().count(), 1);
        assert_eq!(Segment::Forecast.as_str(), "forecast");
    }
}
