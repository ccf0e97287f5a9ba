//! Confidence gate and ranking shared by every classifier.
//!
//! Keeping the comparison and rounding in one place means the field, form and
//! passcode paths cannot disagree on what "confident enough" means.

use std::cmp::Ordering;

use crate::semantic::{ClassificationResult, Scored, SemanticType};

/// Scores are rounded to this many steps per unit so that equal signal sets
/// always produce bit-identical floats.
const SCORE_RESOLUTION: f32 = 10_000.0;

/// Accept a result when its confidence reaches the threshold (`>=`).
#[must_use]
pub fn gate(confidence: f32, threshold: f32) -> bool {
    confidence >= threshold
}

/// Clamp a raw score into `[0, 1]` and round it to the fixed resolution.
#[must_use]
pub fn normalize(score: f32) -> f32 {
    if !score.is_finite() {
        return 0.0;
    }
    (score.clamp(0.0, 1.0) * SCORE_RESOLUTION).round() / SCORE_RESOLUTION
}

/// Best first; equal scores fall back to declaration order.
fn by_rank<T: SemanticType>(a: &Scored<T>, b: &Scored<T>) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.kind.ordinal().cmp(&b.kind.ordinal()))
}

/// Turn per-candidate scores into a ranked, gated result.
///
/// - Zero scores and the `unknown` variant are never candidates.
/// - When the best score passes the gate it becomes the winner and the rest
///   become alternatives.
/// - Otherwise the result is `unknown` with confidence 0, and *every* scored
///   candidate (the raw best included) is kept as an alternative so callers
///   can still run fallback heuristics.
#[must_use]
pub fn rank<T: SemanticType>(scores: &[(T, f32)], threshold: f32) -> ClassificationResult<T> {
    let mut candidates: Vec<Scored<T>> = scores
        .iter()
        .filter(|(kind, _)| *kind != T::unknown())
        .map(|&(kind, score)| Scored {
            kind,
            confidence: normalize(score),
        })
        .filter(|scored| scored.confidence > 0.0)
        .collect();
    candidates.sort_by(by_rank);

    match candidates.first() {
        Some(best) if gate(best.confidence, threshold) => {
            let winner = *best;
            candidates.remove(0);
            ClassificationResult {
                kind: winner.kind,
                confidence: winner.confidence,
                alternatives: candidates,
            }
        }
        _ => ClassificationResult {
            kind: T::unknown(),
            confidence: 0.0,
            alternatives: candidates,
        },
    }
}
