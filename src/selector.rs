//! Picks the diagnosis to show from the inference service's class list.

use crate::models::ClassificationResult;

/// Minimum confidence for any prediction to count as a diagnosis.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosisOutcome {
    /// No entry reached the threshold, or the batch carried a non-finite score.
    Rejected,
    Accepted(ClassificationResult),
}

/// Returns the highest-confidence entry when at least one entry reaches
/// `threshold`. Among equal maxima the first entry wins.
pub fn select(results: &[ClassificationResult], threshold: f64) -> DiagnosisOutcome {
    if results.iter().any(|r| !r.confidence.is_finite()) {
        return DiagnosisOutcome::Rejected;
    }
    if results.iter().all(|r| r.confidence < threshold) {
        return DiagnosisOutcome::Rejected;
    }

    results
        .iter()
        .reduce(|best, r| if r.confidence > best.confidence { r } else { best })
        .map(|winner| DiagnosisOutcome::Accepted(winner.clone()))
        .unwrap_or(DiagnosisOutcome::Rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(label: &str, confidence: f64) -> ClassificationResult {
        ClassificationResult::new(label, confidence)
    }

    #[test]
    fn picks_dominant_class() {
        let results = vec![
            r("Acne or Rosacea", 0.91),
            r("Malignant Lesions", 0.04),
            r("Psoriasis or Lichen Planus", 0.05),
        ];
        assert_eq!(
            select(&results, DEFAULT_THRESHOLD),
            DiagnosisOutcome::Accepted(r("Acne or Rosacea", 0.91))
        );
    }

    #[test]
    fn rejects_when_nothing_reaches_threshold() {
        let results = vec![
            r("Acne or Rosacea", 0.2),
            r("Malignant Lesions", 0.3),
            r("Psoriasis or Lichen Planus", 0.1),
        ];
        assert_eq!(select(&results, DEFAULT_THRESHOLD), DiagnosisOutcome::Rejected);
    }

    #[test]
    fn rejects_empty_batch() {
        assert_eq!(select(&[], DEFAULT_THRESHOLD), DiagnosisOutcome::Rejected);
    }

    #[test]
    fn first_seen_wins_ties() {
        let results = vec![r("A", 0.7), r("B", 0.7)];
        assert_eq!(
            select(&results, DEFAULT_THRESHOLD),
            DiagnosisOutcome::Accepted(r("A", 0.7))
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let results = vec![r("A", 0.1), r("B", 0.5)];
        assert_eq!(
            select(&results, DEFAULT_THRESHOLD),
            DiagnosisOutcome::Accepted(r("B", 0.5))
        );
    }

    #[test]
    fn winner_is_maximum_even_when_it_comes_last() {
        let results = vec![r("A", 0.55), r("B", 0.2), r("C", 0.6)];
        match select(&results, DEFAULT_THRESHOLD) {
            DiagnosisOutcome::Accepted(winner) => assert_eq!(winner.label, "C"),
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_confidence_rejects_batch() {
        let results = vec![r("A", 0.9), r("B", f64::NAN)];
        assert_eq!(select(&results, DEFAULT_THRESHOLD), DiagnosisOutcome::Rejected);

        let results = vec![r("A", f64::INFINITY)];
        assert_eq!(select(&results, DEFAULT_THRESHOLD), DiagnosisOutcome::Rejected);
    }

    #[test]
    fn custom_threshold() {
        let results = vec![r("A", 0.3), r("B", 0.25)];
        assert_eq!(select(&results, 0.3), DiagnosisOutcome::Accepted(r("A", 0.3)));
        assert_eq!(select(&results, 0.31), DiagnosisOutcome::Rejected);
    }
}
