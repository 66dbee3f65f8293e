pub use folio_protocol::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MarginParseError {
    #[error("root margin must have 1 to 4 components, got {0}")]
    ComponentCount(usize),
    #[error("invalid root margin component {0:?}: expected a length in px or %")]
    InvalidComponent(String),
}

/// One edge of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percentage of the viewport's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    fn resolve(self, basis: f64) -> f64 {
        match self {
            MarginLength::Px(px) => px,
            MarginLength::Percent(pct) => basis * pct / 100.0,
        }
    }

    fn parse(token: &str) -> Result<Self, MarginParseError> {
        let invalid = || MarginParseError::InvalidComponent(token.to_owned());
        if let Some(num) = token.strip_suffix("px") {
            return num.parse().map(MarginLength::Px).map_err(|_| invalid());
        }
        if let Some(num) = token.strip_suffix('%') {
            return num.parse().map(MarginLength::Percent).map_err(|_| invalid());
        }
        if token == "0" {
            return Ok(MarginLength::Px(0.0));
        }
        Err(invalid())
    }

    fn format(self) -> String {
        match self {
            MarginLength::Px(px) => format!("{px}px"),
            MarginLength::Percent(pct) => format!("{pct}%"),
        }
    }
}

/// Expansion (positive) or contraction (negative) applied to the viewport
/// before testing for intersection.
///
/// Written the CSS way: `"10px"`, `"0px -20%"`, `"1px 2px 3px"` or
/// `"1px 2px 3px 4px"` (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub const NONE: RootMargin = RootMargin {
        top: MarginLength::Px(0.0),
        right: MarginLength::Px(0.0),
        bottom: MarginLength::Px(0.0),
        left: MarginLength::Px(0.0),
    };

    pub fn parse(input: &str) -> Result<Self, MarginParseError> {
        let parts = input
            .split_whitespace()
            .map(MarginLength::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            other => return Err(MarginParseError::ComponentCount(other.len())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// The viewport grown (or shrunk) by this margin.
    pub fn expand(&self, viewport: Rect) -> Rect {
        let top = self.top.resolve(viewport.h);
        let right = self.right.resolve(viewport.w);
        let bottom = self.bottom.resolve(viewport.h);
        let left = self.left.resolve(viewport.w);
        Rect::new(
            viewport.x - left,
            viewport.y - top,
            (viewport.w + left + right).max(0.0),
            (viewport.h + top + bottom).max(0.0),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<String> for RootMargin {
    type Error = MarginParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RootMargin::parse(&value)
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        [margin.top, margin.right, margin.bottom, margin.left]
            .map(MarginLength::format)
            .join(" ")
    }
}

/// Result of testing one region against the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Any overlap with the root, including a shared edge.
    pub intersecting: bool,
    /// Fraction of the target's area inside the root, `0..=1`.
    pub ratio: f64,
}

/// Test `target` against `viewport` grown by `margin`.
///
/// A zero-area target that lies inside the root counts as fully visible.
pub fn intersect(target: Rect, viewport: Rect, margin: &RootMargin) -> Intersection {
    let root = margin.expand(viewport);
    match target.intersect(&root) {
        None => Intersection {
            intersecting: false,
            ratio: 0.0,
        },
        Some(overlap) => {
            let area = target.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).clamp(0.0, 1.0)
            } else {
                1.0
            };
            Intersection {
                intersecting: true,
                ratio,
            }
        }
    }
}
