use crate::prelude::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of simulated site activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub description: String,
}

impl ActivityTemplate {
    pub fn new(kind: &str, location: &str, description: &str) -> Self {
        Self {
            kind: kind.to_string(),
            location: location.to_string(),
            description: description.to_string(),
        }
    }
}

/// 24-bit RGB display color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for HexColor {
    type Err = SiteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| SiteError::InvalidColor(value.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| SiteError::InvalidColor(value.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Class an overlay box can be labelled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionTemplate {
    pub label: String,
    pub color: HexColor,
}

impl DetectionTemplate {
    pub fn new(label: &str, color: &str) -> SiteResult<Self> {
        Ok(Self {
            label: label.to_string(),
            color: color.parse()?,
        })
    }
}

pub(crate) fn builtin_activities() -> Vec<ActivityTemplate> {
    vec![
        ActivityTemplate::new(
            "Vehicle Detected",
            "Entrance Gate",
            "Construction vehicle entering site",
        ),
        ActivityTemplate::new(
            "Worker Entering Zone",
            "Zone 4",
            "Worker with proper PPE detected",
        ),
        ActivityTemplate::new("Equipment Movement", "Zone 2", "Excavator in operation"),
        ActivityTemplate::new("Perimeter Check", "North Fence", "Routine patrol complete"),
        ActivityTemplate::new(
            "PPE Compliance",
            "Loading Bay 1",
            "All workers properly equipped",
        ),
        ActivityTemplate::new(
            "Fire Extinguisher Check",
            "Zone 3",
            "Equipment verified in position",
        ),
        ActivityTemplate::new(
            "Drone Battery Check",
            "Charging Station",
            "Battery status nominal",
        ),
        ActivityTemplate::new(
            "Worker Count Update",
            "Site-wide",
            "23 workers currently on site",
        ),
    ]
}

pub(crate) fn builtin_detections() -> SiteResult<Vec<DetectionTemplate>> {
    [
        ("Hard Hat", "#27ae60"),
        ("Safety Vest", "#27ae60"),
        ("Person", "#3498db"),
        ("Vehicle", "#9b59b6"),
        ("Excavator", "#e67e22"),
        ("Fire", "#e74c3c"),
        ("No PPE", "#e74c3c"),
    ]
    .into_iter()
    .map(|(label, color)| DetectionTemplate::new(label, color))
    .collect()
}
