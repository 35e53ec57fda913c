use std::collections::BTreeMap;

use tracing::warn;

use crate::math::{Point3, ray::Ray};

/// Labels and arc-length percentages along the sagittal (Nasion→Inion) path.
pub const SAGITTAL: [(&str, f64); 7] = [
    ("Nz", 0.0),
    ("Fpz", 0.10),
    ("Fz", 0.30),
    ("Cz", 0.50),
    ("Pz", 0.70),
    ("Oz", 0.90),
    ("Iz", 1.0),
];

/// Labels and percentages along the coronal (LPA→RPA) path.
pub const CORONAL: [(&str, f64); 6] = [
    ("LPA", 0.0),
    ("T3", 0.10),
    ("C3", 0.30),
    ("C4", 0.70),
    ("T4", 0.90),
    ("RPA", 1.0),
];

/// Labels and percentages along the left temporal (Fpz→T3→Oz) path.
pub const LEFT_TEMPORAL: [(&str, f64); 4] =
    [("Fp1", 0.10), ("F7", 0.30), ("T5", 0.70), ("O1", 0.90)];

/// Labels and percentages along the right temporal (Oz→T4→Fpz) path.
pub const RIGHT_TEMPORAL: [(&str, f64); 4] =
    [("O2", 0.10), ("T6", 0.30), ("F8", 0.70), ("Fp2", 0.90)];

/// A named 10/20 scalp coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    /// World-space position on the surface.
    pub position: Point3,
    /// Nearest mesh vertex index, cached for index-based path lookups.
    pub vertex: u32,
    /// Whether the renderer should draw this landmark.
    pub visible: bool,
}

/// The complete result of one generation run, returned by value.
///
/// Consumers read from the latest snapshot; re-running generation replaces
/// the whole snapshot and never publishes a partial landmark set.
#[derive(Debug, Clone, Default)]
pub struct CoordinateSystem {
    /// Label → landmark, in stable alphabetical iteration order.
    pub landmarks: BTreeMap<String, Landmark>,
    /// Fine-path polylines for line rendering, one per computed arc:
    /// sagittal, coronal, left temporal, right temporal.
    pub paths: Vec<Vec<Point3>>,
    /// Rays cast during the sagittal and coronal fans.
    pub rays: Vec<Ray>,
    /// Ray/surface intersection waypoints, for point rendering.
    pub waypoints: Vec<Point3>,
}

impl CoordinateSystem {
    /// Applies a free-text landmark selection filter.
    ///
    /// `filter` is a comma-separated list of labels; entries are trimmed and
    /// matched case-insensitively. Unrecognized labels are logged and
    /// ignored. An empty (or all-whitespace) filter shows every landmark.
    pub fn apply_label_filter(&mut self, filter: &str) {
        let wanted: Vec<String> = filter
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if wanted.is_empty() {
            for landmark in self.landmarks.values_mut() {
                landmark.visible = true;
            }
            return;
        }

        let known: Vec<String> = self.landmarks.keys().map(|k| k.to_ascii_lowercase()).collect();
        for name in &wanted {
            if !known.contains(name) {
                warn!(label = %name, "ignoring unrecognized landmark label in filter");
            }
        }

        for (label, landmark) in &mut self.landmarks {
            landmark.visible = wanted.contains(&label.to_ascii_lowercase());
        }
    }

    /// Positions of all currently visible landmarks, with their labels.
    #[must_use]
    pub fn visible_landmarks(&self) -> Vec<(&str, Point3)> {
        self.landmarks
            .iter()
            .filter(|(_, lm)| lm.visible)
            .map(|(label, lm)| (label.as_str(), lm.position))
            .collect()
    }
}
