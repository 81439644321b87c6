use serde::{Deserialize, Serialize};

/// Vertical gap between an anchor and the panel below it, in pixels.
pub const ANCHOR_GAP: f64 = 8.0;

/// Opaque handle to a rendered element, issued by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(pub String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// What a floating panel is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnchorTarget {
    /// A rendered element; position tracks its live bounding box.
    Element(ElementRef),
    /// Explicit coordinates, already in document space.
    /// Both must be present to resolve.
    Point { x: Option<f64>, y: Option<f64> },
}

impl AnchorTarget {
    pub fn element(id: impl Into<String>) -> Self {
        AnchorTarget::Element(ElementRef::new(id))
    }

    pub fn point(x: f64, y: f64) -> Self {
        AnchorTarget::Point {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Resolved panel position in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPosition {
    pub top: f64,
    pub left: f64,
}

/// Bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Current document scroll offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Viewport notifications that can move an anchored element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewportEvent {
    Resize,
    Scroll,
}

/// Identifier of a registered viewport listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);
