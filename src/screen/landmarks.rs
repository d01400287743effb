//! Fixed landmark dataset for the campus map
//!
//! Thirteen building pins on the Pai Chai campus, placed once when the
//! map becomes ready. Labels are kept exactly as recorded, stray
//! whitespace included, because they are display data, not prose.

use crate::core::types::LatLng;
use serde::{Deserialize, Serialize};

/// A titled pin rendered on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPin {
    pub label: String,
    pub position: LatLng,
}

impl LandmarkPin {
    pub fn new(label: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.to_string(),
            position: LatLng::new(latitude, longitude),
        }
    }
}

const CAMPUS_LANDMARKS: [(&str, f64, f64); 13] = [
    ("21세기관(P)", 36.32206, 127.3674),
    ("예술관(Y)", 36.32328, 127.3663),
    ("원예실습동(WG)", 36.32323, 127.3655),
    ("아펜젤러기념관(AM)", 36.32262, 127.3651),
    ("백산관(B)", 36.32119, 127.3661),
    ("우남관(W)", 36.31959, 127.3660),
    ("아펜젤러관(A)", 36.31883, 127.3664),
    ("자연과학관(J)", 36.31823, 127.3663),
    ("하워드관(H)", 36.31769, 127.3673),
    ("미래창조관(MC)", 36.31752, 127.3669),
    ("정보과학관(C)", 36.31756, 127.3678),
    ("소월관(S)", 36.31801, 127.3682),
    ("SMART배재관(SP) ", 36.31921, 127.3669),
];

/// The campus building pins in placement order
pub fn campus_landmarks() -> Vec<LandmarkPin> {
    CAMPUS_LANDMARKS
        .iter()
        .map(|(label, latitude, longitude)| LandmarkPin::new(label, *latitude, *longitude))
        .collect()
}

/// Centroid of the landmark set, a reasonable camera fallback when no
/// fix is available
pub fn campus_center() -> LatLng {
    let pins = campus_landmarks();
    let count = pins.len() as f64;
    let latitude = pins.iter().map(|p| p.position.latitude).sum::<f64>() / count;
    let longitude = pins.iter().map(|p| p.position.longitude).sum::<f64>() / count;
    LatLng::new(latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_count() {
        assert_eq!(campus_landmarks().len(), 13);
    }

    #[test]
    fn test_known_entries() {
        let pins = campus_landmarks();
        assert_eq!(pins[0].label, "21세기관(P)");
        assert_eq!(pins[0].position, LatLng::new(36.32206, 127.3674));
        assert_eq!(pins[5].label, "우남관(W)");
        assert_eq!(pins[5].position, LatLng::new(36.31959, 127.3660));
    }

    #[test]
    fn test_recorded_label_kept_verbatim() {
        let pins = campus_landmarks();
        // the source dataset carries a trailing space on this label
        assert_eq!(pins[12].label, "SMART배재관(SP) ");
    }

    #[test]
    fn test_labels_unique() {
        let pins = campus_landmarks();
        for (i, a) in pins.iter().enumerate() {
            for b in pins.iter().skip(i + 1) {
                assert_ne!(a.label, b.label);
            }
        }
    }

    #[test]
    fn test_campus_center_inside_campus() {
        let center = campus_center();
        assert!(center.latitude > 36.317 && center.latitude < 36.324);
        assert!(center.longitude > 127.364 && center.longitude < 127.369);
    }
}
