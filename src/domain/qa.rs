//! Quality review stage artifact

use serde::{Deserialize, Serialize};

use crate::generate::{FieldSpec, FieldType, OutputSchema, StructuredOutput};

/// Findings from the quality review of the content bundle
///
/// Critical issues block publication; recommendations are advisory and
/// never do. The gate decision is derived from this split, not from a
/// self-reported pass flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaReport {
    /// Defects that must block publication (brand violations, factual
    /// errors, restricted claims)
    pub critical_issues: Vec<String>,

    /// Advisory improvements
    pub recommendations: Vec<String>,
}

impl QaReport {
    /// Whether the report carries any blocking defect
    pub fn has_critical_issues(&self) -> bool {
        !self.critical_issues.is_empty()
    }
}

impl StructuredOutput for QaReport {
    fn schema() -> OutputSchema {
        OutputSchema {
            name: "QaReport",
            fields: vec![
                FieldSpec::new("critical_issues", FieldType::array(FieldType::string())),
                FieldSpec::new("recommendations", FieldType::array(FieldType::string())),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::parse_structured;

    #[test]
    fn test_clean_report_parses() {
        let raw = serde_json::json!({
            "critical_issues": [],
            "recommendations": ["tighten the CTA"]
        })
        .to_string();
        let report: QaReport = parse_structured(&raw).unwrap();
        assert!(!report.has_critical_issues());
    }

    #[test]
    fn test_critical_issue_detected() {
        let raw = serde_json::json!({
            "critical_issues": ["headline makes a medical claim"],
            "recommendations": []
        })
        .to_string();
        let report: QaReport = parse_structured(&raw).unwrap();
        assert!(report.has_critical_issues());
    }

    #[test]
    fn test_pass_flag_rejected_as_extra_field() {
        let raw = serde_json::json!({
            "passed": true,
            "critical_issues": [],
            "recommendations": []
        })
        .to_string();
        assert!(parse_structured::<QaReport>(&raw).is_err());
    }
}
