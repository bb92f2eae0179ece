use std::collections::HashMap;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Typical real-world heights (mm) of common road obstacles.
const DEFAULT_HEIGHTS_MM: [(&str, f32); 14] = [
    ("person", 1700.0),
    ("bicycle", 1000.0),
    ("car", 1500.0),
    ("motorcycle", 1100.0),
    ("bus", 3200.0),
    ("truck", 3000.0),
    ("train", 4000.0),
    ("traffic light", 900.0),
    ("fire hydrant", 750.0),
    ("stop sign", 750.0),
    ("bench", 850.0),
    ("dog", 600.0),
    ("horse", 1600.0),
    ("cow", 1400.0),
];

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct LabelHeight {
    pub label: String,
    pub height_mm: f32,
}

impl LabelHeight {
    pub fn new(label: String, height_mm: f32) -> Self {
        Self {
            label,
            height_mm,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.height_mm.is_finite() && self.height_mm > 0.
    }
}

/// Real-world reference height per class name, in millimeters.
///
/// Classes missing from the table get no distance estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceHeights {
    heights: HashMap<String, f32>,
}

impl Default for ReferenceHeights {
    fn default() -> Self {
        Self {
            heights: DEFAULT_HEIGHTS_MM
                .iter()
                .map(|(label, h)| (label.to_string(), *h))
                .collect(),
        }
    }
}

impl ReferenceHeights {
    /// An empty table; every lookup misses.
    pub fn empty() -> Self {
        Self {
            heights: HashMap::new(),
        }
    }

    /// Builds a table from label entries. Non-positive heights are skipped.
    pub fn from_labels(labels: &[LabelHeight]) -> Self {
        let heights = labels
            .iter()
            .filter(|l| {
                if !l.is_usable() {
                    log::warn!("Ignoring reference height {} for label '{}'", l.height_mm, l.label);
                }
                l.is_usable()
            })
            .map(|l| (l.label.clone(), l.height_mm))
            .collect();
        Self { heights }
    }

    /// Parses a `{"label": height_mm, ...}` JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json).context("Failed to parse reference height table")?;
        Ok(table)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference height table {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn with_height(mut self, label: &str, height_mm: f32) -> Self {
        self.heights.insert(label.to_string(), height_mm);
        self
    }

    /// Height in millimeters for `label`, if known and positive.
    pub fn get(&self, label: &str) -> Option<f32> {
        self.heights
            .get(label)
            .copied()
            .filter(|h| h.is_finite() && *h > 0.)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}
