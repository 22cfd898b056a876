//! Domain Services
//!
//! Pure validation of answer submissions.

use crate::domain::value_objects::{AnswerLabel, Point};
use crate::error::{SurveyError, SurveyResult};

/// Check a submission against the points it answers.
///
/// One answer per point, each in the closed label set.
pub fn validate_answers(points: &[Point], answers: &[i64]) -> SurveyResult<Vec<AnswerLabel>> {
    if answers.len() != points.len() {
        return Err(SurveyError::LengthMismatch {
            expected: points.len(),
            actual: answers.len(),
        });
    }

    answers
        .iter()
        .map(|&raw| AnswerLabel::new(raw).ok_or(SurveyError::InvalidLabel(raw)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, i as f64)).collect()
    }

    #[test]
    fn test_length_mismatch() {
        let err = validate_answers(&points(2), &[0]).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_invalid_label() {
        let err = validate_answers(&points(1), &[2]).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidLabel(2)));

        let err = validate_answers(&points(2), &[0, -1]).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidLabel(-1)));
    }

    #[test]
    fn test_valid_submission() {
        let labels = validate_answers(&points(2), &[0, 1]).unwrap();
        let values: Vec<u8> = labels.iter().map(AnswerLabel::value).collect();
        assert_eq!(values, vec![0, 1]);
    }

    #[test]
    fn test_length_checked_before_labels() {
        let err = validate_answers(&points(1), &[7, 7]).unwrap_err();
        assert!(matches!(err, SurveyError::LengthMismatch { .. }));
    }

    #[test]
    fn test_empty_submission_for_empty_session() {
        assert!(validate_answers(&[], &[]).unwrap().is_empty());
    }
}
