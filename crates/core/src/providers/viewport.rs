use std::rc::Rc;

use crate::models::overlay::{ElementRef, ListenerId, Rect, ScrollOffset, ViewportEvent};

/// Callback invoked by the host when a subscribed event fires.
pub type Listener = Rc<dyn Fn()>;

/// Geometry and event source of the host page.
///
/// In the browser this wraps `getBoundingClientRect`, `window.scrollX/Y`
/// and `addEventListener`; tests use an in-memory fake.
pub trait Viewport {
    /// Bounding box of `element` in viewport coordinates,
    /// or `None` if the element is not rendered.
    fn element_rect(&self, element: &ElementRef) -> Option<Rect>;

    fn scroll_offset(&self) -> ScrollOffset;

    /// Register `listener` for `event`. With `capture` set, scroll events
    /// from nested scroll containers are delivered too.
    fn add_listener(&self, event: ViewportEvent, capture: bool, listener: Listener) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);
}
