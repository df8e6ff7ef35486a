use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAnchor {
    Top,
    Middle,
    #[default]
    Bottom,
}

/// Which height the vertical anchor is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JustificationReference {
    /// Height of the reference capital, independent of the text.
    #[default]
    CapHeight,
    /// Height of the bounding box of the text itself.
    ShapeHeight,
}

/// Anchor point of a shape string, e.g. `Bottom-Left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Justification {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl Justification {
    pub const ALL: [Justification; 9] = [
        Justification::new(VerticalAnchor::Top, HorizontalAnchor::Left),
        Justification::new(VerticalAnchor::Top, HorizontalAnchor::Center),
        Justification::new(VerticalAnchor::Top, HorizontalAnchor::Right),
        Justification::new(VerticalAnchor::Middle, HorizontalAnchor::Left),
        Justification::new(VerticalAnchor::Middle, HorizontalAnchor::Center),
        Justification::new(VerticalAnchor::Middle, HorizontalAnchor::Right),
        Justification::new(VerticalAnchor::Bottom, HorizontalAnchor::Left),
        Justification::new(VerticalAnchor::Bottom, HorizontalAnchor::Center),
        Justification::new(VerticalAnchor::Bottom, HorizontalAnchor::Right),
    ];

    pub const fn new(vertical: VerticalAnchor, horizontal: HorizontalAnchor) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown justification {0:?}")]
pub struct ParseJustificationError(pub String);

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertical = match self.vertical {
            VerticalAnchor::Top => "Top",
            VerticalAnchor::Middle => "Middle",
            VerticalAnchor::Bottom => "Bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalAnchor::Left => "Left",
            HorizontalAnchor::Center => "Center",
            HorizontalAnchor::Right => "Right",
        };
        write!(f, "{vertical}-{horizontal}")
    }
}

impl FromStr for Justification {
    type Err = ParseJustificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseJustificationError(s.to_string());
        let (vertical, horizontal) = s.trim().split_once('-').ok_or_else(err)?;
        let vertical = match vertical {
            "Top" => VerticalAnchor::Top,
            "Middle" => VerticalAnchor::Middle,
            "Bottom" => VerticalAnchor::Bottom,
            _ => return Err(err()),
        };
        let horizontal = match horizontal {
            "Left" => HorizontalAnchor::Left,
            "Center" => HorizontalAnchor::Center,
            "Right" => HorizontalAnchor::Right,
            _ => return Err(err()),
        };
        Ok(Self::new(vertical, horizontal))
    }
}

impl fmt::Display for JustificationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JustificationReference::CapHeight => write!(f, "Cap Height"),
            JustificationReference::ShapeHeight => write!(f, "Shape Height"),
        }
    }
}

impl FromStr for JustificationReference {
    type Err = ParseJustificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Cap Height" => Ok(JustificationReference::CapHeight),
            "Shape Height" => Ok(JustificationReference::ShapeHeight),
            other => Err(ParseJustificationError(other.to_string())),
        }
    }
}

/// Offset that moves the anchor point of `bbox` to the origin.
///
/// The left margin (leading white space, kerning) is removed unless
/// `keep_left_margin` is set and the string is left aligned.
pub fn justification_vector(
    bbox: Rect,
    cap_height: f64,
    justification: Justification,
    reference: JustificationReference,
    keep_left_margin: bool,
) -> Vec2 {
    let mut offset =
        if keep_left_margin && justification.horizontal == HorizontalAnchor::Left {
            Vec2::ZERO
        } else {
            Vec2::new(-bbox.min_x(), 0.0)
        };
    let width = bbox.width();

    let height = match reference {
        JustificationReference::ShapeHeight => {
            offset.y -= bbox.min_y();
            bbox.height()
        }
        JustificationReference::CapHeight => cap_height,
    };

    match justification.vertical {
        VerticalAnchor::Top => offset.y -= height,
        VerticalAnchor::Middle => offset.y -= height / 2.0,
        VerticalAnchor::Bottom => {}
    }
    match justification.horizontal {
        HorizontalAnchor::Right => offset.x -= width,
        HorizontalAnchor::Center => offset.x -= width / 2.0,
        HorizontalAnchor::Left => {}
    }
    offset
}
