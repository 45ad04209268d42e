//! Maps quality scores to ordered, human-readable guidance.

use crate::types::{QualityMetrics, Recommendation, Severity};

pub const COMPLETENESS_THRESHOLD: f64 = 90.0;
pub const CONSISTENCY_THRESHOLD: f64 = 80.0;
pub const UNIQUENESS_THRESHOLD: f64 = 95.0;
pub const VALIDITY_THRESHOLD: f64 = 85.0;
pub const OVERALL_POOR_THRESHOLD: f64 = 80.0;
pub const OVERALL_GOOD_THRESHOLD: f64 = 90.0;

/// Derive recommendations from quality metrics.
///
/// Dimension rules fire independently in a fixed order. The overall rule
/// always contributes exactly one entry, so the result is never empty.
pub fn recommend(metrics: &QualityMetrics) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if metrics.completeness < COMPLETENESS_THRESHOLD {
        recommendations.push(Recommendation::new(
            Severity::Critical,
            "High missing data detected",
            "Consider data imputation strategies or investigate data collection processes.",
        ));
    }

    if metrics.consistency < CONSISTENCY_THRESHOLD {
        recommendations.push(Recommendation::new(
            Severity::Warning,
            "Data type inconsistencies found",
            "Review data validation rules and standardize data formats.",
        ));
    }

    if metrics.uniqueness < UNIQUENESS_THRESHOLD {
        recommendations.push(Recommendation::new(
            Severity::Warning,
            "Duplicate records identified",
            "Implement deduplication processes and review data sources.",
        ));
    }

    if metrics.validity < VALIDITY_THRESHOLD {
        recommendations.push(Recommendation::new(
            Severity::Critical,
            "Data validity issues detected",
            "Review business rules and implement data validation constraints.",
        ));
    }

    recommendations.push(if metrics.overall < OVERALL_POOR_THRESHOLD {
        Recommendation::new(
            Severity::Critical,
            "Overall data quality is poor",
            "Consider comprehensive data quality improvement initiatives.",
        )
    } else if metrics.overall < OVERALL_GOOD_THRESHOLD {
        Recommendation::new(
            Severity::Warning,
            "Data quality needs improvement",
            "Focus on identified issues to reach good quality standards.",
        )
    } else {
        Recommendation::new(
            Severity::Ok,
            "Data quality is good",
            "Maintain current standards and monitor for degradation.",
        )
    });

    recommendations
}
