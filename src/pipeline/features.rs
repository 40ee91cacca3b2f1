//! Scalar feature extraction
//!
//! Derives the per-frame feature set from the finger vector and landmark
//! geometry. Distances are normalized by the wrist-to-middle-MCP reference
//! so features are resolution independent. Pure and deterministic: the same
//! inputs always produce the same outputs.

use crate::hand::landmarks::{
    normalized_distance, reference_distance, LandmarkId, LandmarkMap, Point, FINGERTIPS,
};
use crate::hand::types::FingerVector;
use serde::{Deserialize, Serialize};

/// Derived geometric features for one frame.
///
/// Measures that need unavailable geometry fall back to 0.0 (the frame is
/// flagged upstream when landmarks are missing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Fraction of fingers extended, 0.0 (fist) to 1.0 (fully open)
    pub openness: f64,
    /// Diagonal of the fingertip bounding box over the reference distance
    pub span: f64,
    /// Thumb-tip-to-index-tip distance over the reference distance
    pub pinch: f64,
    /// Midpoint of wrist and middle-MCP
    pub palm_center: Point,
}

/// Stateless feature extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Compute the feature set for one frame
    pub fn extract(fingers: &FingerVector, landmarks: &LandmarkMap) -> FeatureSet {
        FeatureSet {
            openness: fingers.count() as f64 / 5.0,
            span: Self::span(landmarks),
            pinch: normalized_distance(landmarks, LandmarkId::ThumbTip, LandmarkId::IndexTip)
                .unwrap_or(0.0),
            palm_center: Self::palm_center(landmarks),
        }
    }

    /// Normalized diagonal of the bounding box over the five fingertips.
    /// 0.0 when any fingertip or the reference distance is unavailable.
    fn span(landmarks: &LandmarkMap) -> f64 {
        let Some(reference) = reference_distance(landmarks) else {
            return 0.0;
        };
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for tip in FINGERTIPS {
            let Some(p) = landmarks.get(&tip) else {
                return 0.0;
            };
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (max.x - min.x).hypot(max.y - min.y) / reference
    }

    fn palm_center(landmarks: &LandmarkMap) -> Point {
        match (
            landmarks.get(&LandmarkId::Wrist),
            landmarks.get(&LandmarkId::MiddleMcp),
        ) {
            (Some(wrist), Some(middle_mcp)) => wrist.midpoint(middle_mcp),
            _ => Point::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::landmarks::{landmark_map, Landmark, LANDMARK_COUNT};

    fn test_hand() -> LandmarkMap {
        let mut landmarks: Vec<Landmark> = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(300.0 + i as f64, 280.0 + i as f64))
            .collect();
        landmarks[LandmarkId::Wrist.index()] = Landmark::new(320.0, 400.0);
        landmarks[LandmarkId::MiddleMcp.index()] = Landmark::new(320.0, 300.0);
        landmarks[LandmarkId::ThumbTip.index()] = Landmark::new(220.0, 260.0);
        landmarks[LandmarkId::IndexTip.index()] = Landmark::new(280.0, 200.0);
        landmarks[LandmarkId::MiddleTip.index()] = Landmark::new(320.0, 190.0);
        landmarks[LandmarkId::RingTip.index()] = Landmark::new(360.0, 200.0);
        landmarks[LandmarkId::PinkyTip.index()] = Landmark::new(420.0, 260.0);
        landmark_map(&landmarks)
    }

    fn fingers(values: [u8; 5]) -> FingerVector {
        FingerVector::from_slice(&values).unwrap()
    }

    #[test]
    fn test_openness() {
        let map = test_hand();
        assert_eq!(
            FeatureExtractor::extract(&fingers([1, 1, 1, 1, 1]), &map).openness,
            1.0
        );
        assert_eq!(
            FeatureExtractor::extract(&fingers([0, 0, 0, 0, 0]), &map).openness,
            0.0
        );
        assert_eq!(
            FeatureExtractor::extract(&fingers([0, 1, 1, 0, 0]), &map).openness,
            0.4
        );
    }

    #[test]
    fn test_span_is_normalized_bbox_diagonal() {
        let map = test_hand();
        let features = FeatureExtractor::extract(&fingers([1, 1, 1, 1, 1]), &map);
        // fingertip bbox: x 220..420, y 190..260; reference distance 100
        let expected = (200.0f64.powi(2) + 70.0f64.powi(2)).sqrt() / 100.0;
        assert!((features.span - expected).abs() < 1e-9);
    }

    #[test]
    fn test_span_is_resolution_independent() {
        let map = test_hand();
        let scaled: LandmarkMap = map
            .iter()
            .map(|(id, p)| (*id, Point::new(p.x * 2.0, p.y * 2.0)))
            .collect();
        let a = FeatureExtractor::extract(&fingers([1, 1, 1, 1, 1]), &map).span;
        let b = FeatureExtractor::extract(&fingers([1, 1, 1, 1, 1]), &scaled).span;
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_pinch() {
        let map = test_hand();
        let features = FeatureExtractor::extract(&fingers([1, 1, 0, 0, 0]), &map);
        // thumb tip (220,260) to index tip (280,200) = sqrt(7200) over 100
        let expected = 7200.0f64.sqrt() / 100.0;
        assert!((features.pinch - expected).abs() < 1e-9);
    }

    #[test]
    fn test_palm_center() {
        let map = test_hand();
        let features = FeatureExtractor::extract(&fingers([0, 0, 0, 0, 0]), &map);
        assert_eq!(features.palm_center, Point::new(320.0, 350.0));
    }

    #[test]
    fn test_missing_geometry_falls_back_to_zero() {
        let short: Vec<Landmark> = (0..10).map(|i| Landmark::new(i as f64, 0.0)).collect();
        let map = landmark_map(&short);
        let features = FeatureExtractor::extract(&fingers([0, 1, 0, 0, 0]), &map);
        assert_eq!(features.span, 0.0);
        // thumb tip, index tip and the reference survive a 10-point frame,
        // so pinch is still computable
        assert!(features.pinch > 0.0);
        assert_eq!(features.openness, 0.2);
    }

    #[test]
    fn test_degenerate_reference_zeroes_normalized_features() {
        let mut landmarks: Vec<Landmark> = (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f64, i as f64))
            .collect();
        // wrist and middle MCP coincide
        landmarks[LandmarkId::Wrist.index()] = Landmark::new(50.0, 50.0);
        landmarks[LandmarkId::MiddleMcp.index()] = Landmark::new(50.0, 50.0);
        let map = landmark_map(&landmarks);
        let features = FeatureExtractor::extract(&fingers([1, 1, 1, 1, 1]), &map);
        assert_eq!(features.span, 0.0);
        assert_eq!(features.pinch, 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let map = test_hand();
        let v = fingers([0, 1, 1, 0, 0]);
        let first = FeatureExtractor::extract(&v, &map);
        for _ in 0..10 {
            assert_eq!(FeatureExtractor::extract(&v, &map), first);
        }
    }
}
