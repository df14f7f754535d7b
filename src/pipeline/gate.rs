//! Quality gate

use tracing::{debug, info, warn};

use crate::domain::QaReport;

/// The gate decision after the quality stage
///
/// One critical issue is enough to halt. Recommendations never block -
/// they ride along with a proceed verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Proceed { recommendations: Vec<String> },
    Halt { critical_issues: Vec<String> },
}

impl GateVerdict {
    /// Compute the verdict from a quality report
    pub fn from_report(report: &QaReport) -> Self {
        debug!(
            critical = %report.critical_issues.len(),
            recommendations = %report.recommendations.len(),
            "GateVerdict::from_report: called"
        );
        if report.has_critical_issues() {
            warn!(critical = %report.critical_issues.len(), "GateVerdict::from_report: halting");
            GateVerdict::Halt {
                critical_issues: report.critical_issues.clone(),
            }
        } else {
            info!("GateVerdict::from_report: proceeding");
            GateVerdict::Proceed {
                recommendations: report.recommendations.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report_proceeds() {
        let report = QaReport {
            critical_issues: vec![],
            recommendations: vec![],
        };
        assert_eq!(
            GateVerdict::from_report(&report),
            GateVerdict::Proceed { recommendations: vec![] }
        );
    }

    #[test]
    fn test_recommendations_never_block() {
        let report = QaReport {
            critical_issues: vec![],
            recommendations: vec!["shorten the headline".to_string(); 12],
        };
        assert!(matches!(GateVerdict::from_report(&report), GateVerdict::Proceed { .. }));
    }

    #[test]
    fn test_single_critical_issue_halts() {
        let report = QaReport {
            critical_issues: vec!["uses a restricted claim".to_string()],
            recommendations: vec!["also: shorten the headline".to_string()],
        };
        match GateVerdict::from_report(&report) {
            GateVerdict::Halt { critical_issues } => {
                assert_eq!(critical_issues.len(), 1);
            }
            other => panic!("expected halt, got {other:?}"),
        }
    }
}
