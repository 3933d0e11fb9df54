//! Number extraction and selection from recognized text.

use crate::vision::recognition::RecognizedSpan;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A run of digits, optionally followed by a decimal point and more digits.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.?\d*").expect("Invalid number pattern"));

/// A numeric substring together with the confidence of the span it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericCandidate {
    #[serde(rename = "number")]
    pub value: String,
    pub confidence: f32,
}

/// The winning number plus every candidate that was considered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberSelection {
    pub number: String,
    pub confidence: f32,
    pub all_numbers: Vec<NumericCandidate>,
}

/// What a scan found in a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// At least one number was accepted.
    Found(NumberSelection),
    /// The recognizer returned no text at all.
    NoText,
    /// Text was recognized but none of it yielded an accepted number.
    NoNumbers,
}

impl ScanOutcome {
    /// Message reported to callers when nothing was found.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ScanOutcome::Found(_) => None,
            ScanOutcome::NoText => Some("No text detected in the frame"),
            ScanOutcome::NoNumbers => Some("No numbers detected in the frame"),
        }
    }
}

/// Extract numeric candidates from spans scoring strictly above `min_confidence`.
///
/// Candidates keep span order, and left-to-right order within a span.
pub fn extract_candidates(spans: &[RecognizedSpan], min_confidence: f32) -> Vec<NumericCandidate> {
    let mut found = Vec::new();

    for span in spans {
        if span.confidence > min_confidence {
            for m in NUMBER_PATTERN.find_iter(&span.text) {
                info!(number = m.as_str(), confidence = span.confidence, "Number found");
                found.push(NumericCandidate {
                    value: m.as_str().to_string(),
                    confidence: span.confidence,
                });
            }
        }
    }

    found
}

/// Pick the candidate with the highest confidence. The earliest one wins a tie.
pub fn select_number(candidates: Vec<NumericCandidate>) -> Option<NumberSelection> {
    let best = candidates
        .iter()
        .fold(None::<&NumericCandidate>, |best, candidate| match best {
            Some(current) if current.confidence >= candidate.confidence => Some(current),
            _ => Some(candidate),
        })?
        .clone();

    Some(NumberSelection {
        number: best.value,
        confidence: best.confidence,
        all_numbers: candidates,
    })
}

/// Turn recognizer output into a scan outcome.
pub fn classify(spans: &[RecognizedSpan], min_confidence: f32) -> ScanOutcome {
    if spans.is_empty() {
        return ScanOutcome::NoText;
    }

    match select_number(extract_candidates(spans, min_confidence)) {
        Some(selection) => ScanOutcome::Found(selection),
        None => ScanOutcome::NoNumbers,
    }
}
