//! Field boundary configuration submitted via `POST /api/field-config`.
//!
//! A field is a rectangle described by its dimensions plus three anchor
//! beacons placed at the top-left, top-right and bottom-left corners.
//! Both anchors and dimensions are kept as the JSON the app sent, so the
//! configuration echoes back unchanged; the numeric size is read out once
//! at validation time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Number of anchors a field configuration must carry.
pub const REQUIRED_ANCHORS: usize = 3;

/// Corner of the field an anchor is placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnchorCorner {
    /// Top-left corner, the field origin.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
}

impl AnchorCorner {
    /// All corners a complete configuration places anchors at.
    pub const ALL: [Self; 3] = [Self::TopLeft, Self::TopRight, Self::BottomLeft];

    /// Short tag used on the wire (`TL`, `TR`, `BL`).
    pub const fn tag(self) -> &'static str {
        match self {
            Self::TopLeft => "TL",
            Self::TopRight => "TR",
            Self::BottomLeft => "BL",
        }
    }
}

impl fmt::Display for AnchorCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AnchorCorner {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TL" => Ok(Self::TopLeft),
            "TR" => Ok(Self::TopRight),
            "BL" => Ok(Self::BottomLeft),
            _ => Err(()),
        }
    }
}

/// An anchor beacon, stored verbatim as the JSON value the app sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct Anchor(#[ts(type = "unknown")] pub Value);

impl Anchor {
    /// The corner this anchor is tagged with.
    ///
    /// Reads the `corner` key, falling back to `id`. Returns `None` when
    /// the anchor is not an object or neither key holds a known tag.
    pub fn corner(&self) -> Option<AnchorCorner> {
        let fields = self.0.as_object()?;
        ["corner", "id"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .find_map(|tag| tag.parse().ok())
    }
}

/// Physical size of the field in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FieldDimensions {
    /// Extent along the x axis.
    pub width: f64,
    /// Extent along the y axis.
    pub height: f64,
}

/// A validated field configuration.
///
/// Serializes to `{anchors, dimensions}` exactly as submitted. Keys other
/// than those two are not part of the configuration and are not kept.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FieldConfig {
    anchors: Vec<Anchor>,
    #[ts(type = "{ width: number; height: number; [key: string]: unknown }")]
    dimensions: Value,
    #[serde(skip)]
    #[ts(skip)]
    size: FieldDimensions,
}

impl FieldConfig {
    /// Validate a `POST /api/field-config` body.
    ///
    /// `anchors` must be an array of exactly [`REQUIRED_ANCHORS`] entries
    /// of any shape. `dimensions` must be an object whose `width` and
    /// `height` are numbers.
    ///
    /// # Errors
    ///
    /// Returns [`FieldConfigError::AnchorCount`] or
    /// [`FieldConfigError::MissingDimensions`], checked in that order.
    pub fn from_request(body: &Value) -> Result<Self, FieldConfigError> {
        let anchors = body
            .get("anchors")
            .and_then(Value::as_array)
            .filter(|a| a.len() == REQUIRED_ANCHORS)
            .ok_or(FieldConfigError::AnchorCount)?;

        let dimensions = body
            .get("dimensions")
            .filter(|d| d.is_object())
            .ok_or(FieldConfigError::MissingDimensions)?;
        let number = |key: &str| dimensions.get(key).and_then(Value::as_f64);
        let (width, height) = number("width")
            .zip(number("height"))
            .ok_or(FieldConfigError::MissingDimensions)?;

        Ok(Self {
            anchors: anchors.iter().cloned().map(Anchor).collect(),
            dimensions: dimensions.clone(),
            size: FieldDimensions { width, height },
        })
    }

    /// The anchors, in the order they were submitted.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// The dimensions object as submitted.
    pub const fn dimensions(&self) -> &Value {
        &self.dimensions
    }

    /// Numeric field size read from the dimensions.
    pub const fn size(&self) -> FieldDimensions {
        self.size
    }

    /// Find the anchor tagged with `corner`, if any.
    pub fn anchor(&self, corner: AnchorCorner) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.corner() == Some(corner))
    }

    /// Human-readable size, e.g. `Field configured: 20m x 15m`.
    pub fn summary(&self) -> String {
        format!(
            "Field configured: {}m x {}m",
            self.size.width, self.size.height
        )
    }
}

impl TryFrom<&Value> for FieldConfig {
    type Error = FieldConfigError;

    fn try_from(body: &Value) -> Result<Self, Self::Error> {
        Self::from_request(body)
    }
}

/// Reasons a field configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldConfigError {
    /// Anchors were missing, not an array, or not exactly three.
    #[error("Exactly 3 anchors required")]
    AnchorCount,

    /// Dimensions were missing, or lacked a numeric width or height.
    #[error("Field dimensions (width, height) required")]
    MissingDimensions,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_three_anchors_with_dimensions() {
        let config = FieldConfig::from_request(&json!({
            "anchors": [
                {"id": "TL", "x": 0, "y": 0},
                {"id": "TR", "x": 20, "y": 0},
                {"id": "BL", "x": 0, "y": 15},
            ],
            "dimensions": {"width": 20, "height": 15},
        }));

        assert!(config.is_ok());
        let Ok(config) = config else { return };
        assert_eq!(config.anchors().len(), 3);
        assert!(config.anchor(AnchorCorner::TopRight).is_some());
        assert_eq!(config.size(), FieldDimensions { width: 20.0, height: 15.0 });
        assert_eq!(config.summary(), "Field configured: 20m x 15m");
    }

    #[test]
    fn serializes_as_submitted() {
        let dimensions = json!({"width": 10, "height": 7.5, "unit": "m"});
        let body = json!({
            "anchors": ["TL", 2, {"corner": "BL"}],
            "dimensions": dimensions,
            "name": "back lawn",
        });

        let Ok(config) = FieldConfig::from_request(&body) else {
            panic!("valid configuration rejected");
        };
        let echoed = serde_json::to_string(&config).unwrap_or_default();

        // Integers stay integers; unknown dimension keys survive.
        assert!(echoed.contains(r#""width":10"#), "{echoed}");
        assert!(!echoed.contains("10.0"), "{echoed}");
        assert_eq!(
            serde_json::to_value(&config).unwrap_or_default(),
            json!({"anchors": body["anchors"], "dimensions": dimensions})
        );
    }

    #[test]
    fn rejects_wrong_anchor_count() {
        let dims = json!({"width": 10, "height": 10});

        let counts = [
            json!([{"id": "TL"}, {"id": "TR"}]),
            json!([1, 2]),
            json!([1, 2, 3, 4]),
        ];
        for anchors in counts {
            let body = json!({"anchors": anchors, "dimensions": dims});
            assert_eq!(
                FieldConfig::from_request(&body),
                Err(FieldConfigError::AnchorCount),
                "{body}"
            );
        }

        let malformed = [
            json!({"dimensions": dims}),
            json!({"anchors": "TL,TR,BL", "dimensions": dims}),
            json!([]),
        ];
        for body in malformed {
            assert_eq!(
                FieldConfig::from_request(&body),
                Err(FieldConfigError::AnchorCount),
                "{body}"
            );
        }
    }

    #[test]
    fn rejects_partial_dimensions() {
        let partial = [
            json!({"width": 10}),
            json!({"width": 10, "height": "10"}),
            json!(10),
        ];
        for dimensions in partial {
            let body = json!({"anchors": [{}, {}, {}], "dimensions": dimensions});
            assert_eq!(
                FieldConfig::from_request(&body),
                Err(FieldConfigError::MissingDimensions),
                "{body}"
            );
        }
    }

    #[test]
    fn untagged_anchors_are_tolerated() {
        let body = json!({
            "anchors": [{"name": "a"}, "TL", {"corner": "BL"}],
            "dimensions": {"width": 5, "height": 5},
        });

        let Ok(config) = FieldConfig::from_request(&body) else {
            panic!("untagged anchors must not be rejected");
        };
        assert!(config.anchor(AnchorCorner::TopLeft).is_none());
        assert_eq!(
            config.anchor(AnchorCorner::BottomLeft).and_then(Anchor::corner),
            Some(AnchorCorner::BottomLeft)
        );
    }
}
