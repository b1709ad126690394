use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated request body for the predict endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub total_sqft: f64,
    pub bhk: u32,
    pub bath: u32,
    pub location: String,
}

/// Estimated price, in Lakh.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub estimated_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

/// Form input as captured, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDraft {
    pub total_sqft: f64,
    pub bhk: i64,
    pub bath: i64,
    pub location: String,
}

impl Default for PredictionDraft {
    fn default() -> Self {
        Self {
            total_sqft: 1000.0,
            bhk: 2,
            bath: 2,
            location: String::new(),
        }
    }
}

impl PredictionDraft {
    /// Advisory client-side checks; the server has the final word.
    ///
    /// When `catalog` is non-empty the location must be one of its entries.
    pub fn validate(&self, catalog: &[String]) -> Result<PredictionRequest> {
        if !self.total_sqft.is_finite() || self.total_sqft <= 0.0 {
            return Err(Error::validation("Area must be a positive number of square feet"));
        }

        let bhk = positive_count("Bedrooms", self.bhk)?;
        let bath = positive_count("Bathrooms", self.bath)?;

        if self.location.trim().is_empty() {
            return Err(Error::validation("Select a location"));
        }
        if !catalog.is_empty() && !catalog.contains(&self.location) {
            return Err(Error::validation(format!("Unknown location: {}", self.location)));
        }

        Ok(PredictionRequest {
            total_sqft: self.total_sqft,
            bhk,
            bath,
            location: self.location.clone(),
        })
    }
}

fn positive_count(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| Error::validation(format!("{field} must be at least 1")))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowResult {
    #[default]
    Idle,
    Loading,
    Success(f64),
    Failure(String),
}

impl WorkflowResult {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Success(price) => Some(*price),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Loading => f.write_str("Calculating..."),
            Self::Success(price) => write!(f, "{} Lakh", format_price(*price)),
            Self::Failure(message) => f.write_str(message),
        }
    }
}

/// Two-decimal rendering used wherever a price is shown.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn catalog() -> Vec<String> {
        vec!["Electronic City".to_string(), "Whitefield".to_string()]
    }

    fn draft(total_sqft: f64, bhk: i64, bath: i64, location: &str) -> PredictionDraft {
        PredictionDraft {
            total_sqft,
            bhk,
            bath,
            location: location.to_string(),
        }
    }

    #[test]
    fn test_valid_draft_is_passed_through() {
        let request = draft(1200.0, 3, 2, "Electronic City")
            .validate(&catalog())
            .unwrap();
        assert_eq!(
            request,
            PredictionRequest {
                total_sqft: 1200.0,
                bhk: 3,
                bath: 2,
                location: "Electronic City".to_string(),
            }
        );
    }

    #[rstest]
    #[case(draft(0.0, 2, 2, "Whitefield"))]
    #[case(draft(-50.0, 2, 2, "Whitefield"))]
    #[case(draft(f64::NAN, 2, 2, "Whitefield"))]
    #[case(draft(f64::INFINITY, 2, 2, "Whitefield"))]
    #[case(draft(1000.0, 0, 2, "Whitefield"))]
    #[case(draft(1000.0, 2, -1, "Whitefield"))]
    #[case(draft(1000.0, 2, 2, ""))]
    #[case(draft(1000.0, 2, 2, "   "))]
    #[case(draft(1000.0, 2, 2, "Atlantis"))]
    #[case(draft(1000.0, 2, 2, " Whitefield"))]
    #[case(draft(1000.0, 2, 2, "Whitefield "))]
    fn test_invalid_drafts_rejected(#[case] input: PredictionDraft) {
        let result = input.validate(&catalog());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_any_location_accepted_without_catalog() {
        let request = draft(1000.0, 2, 2, "Atlantis").validate(&[]).unwrap();
        assert_eq!(request.location, "Atlantis");
    }

    #[test]
    fn test_location_is_sent_as_entered() {
        let request = draft(1000.0, 2, 2, " Atlantis ").validate(&[]).unwrap();
        assert_eq!(request.location, " Atlantis ");
    }

    #[test]
    fn test_default_draft() {
        let draft = PredictionDraft::default();
        assert_eq!(draft.total_sqft, 1000.0);
        assert_eq!(draft.bhk, 2);
        assert_eq!(draft.bath, 2);
        assert!(draft.location.is_empty());
    }

    #[rstest]
    #[case(50.5, "50.50")]
    #[case(0.0, "0.00")]
    #[case(123.456, "123.46")]
    #[case(89.999, "90.00")]
    fn test_format_price(#[case] price: f64, #[case] expected: &str) {
        assert_eq!(format_price(price), expected);
    }

    #[test]
    fn test_result_display() {
        assert_eq!(WorkflowResult::Success(50.5).to_string(), "50.50 Lakh");
        assert_eq!(
            WorkflowResult::Failure("Prediction failed".to_string()).to_string(),
            "Prediction failed"
        );
        assert_eq!(WorkflowResult::Idle.to_string(), "");
        assert!(WorkflowResult::Loading.is_loading());
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(draft(1200.0, 3, 2, "Electronic City").validate(&[]).unwrap())
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "total_sqft": 1200.0,
                "bhk": 3,
                "bath": 2,
                "location": "Electronic City"
            })
        );
    }
}
