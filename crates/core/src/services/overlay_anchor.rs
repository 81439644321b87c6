use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::errors::CoreError;
use crate::models::overlay::{
    AnchorPosition, AnchorTarget, ListenerId, ViewportEvent, ANCHOR_GAP,
};
use crate::providers::viewport::{Listener, Viewport};

/// Resolve where a panel anchored to `target` should sit, in document
/// coordinates, from the viewport's live geometry.
///
/// - Element: `top` is the element's bottom edge plus scroll plus the
///   gap; `left` is its left edge plus horizontal scroll.
/// - Point: `top = y + gap`, `left = x`; no scroll adjustment.
///
/// Nothing is cached: every call re-reads geometry.
pub fn resolve_position<V: Viewport + ?Sized>(
    viewport: &V,
    target: &AnchorTarget,
) -> Result<AnchorPosition, CoreError> {
    match target {
        AnchorTarget::Element(element) => {
            let rect = viewport.element_rect(element).ok_or_else(|| {
                CoreError::InvalidInput(format!("anchor element {} is not rendered", element.0))
            })?;
            let scroll = viewport.scroll_offset();
            Ok(AnchorPosition {
                top: rect.bottom() + scroll.y + ANCHOR_GAP,
                left: rect.left + scroll.x,
            })
        }
        AnchorTarget::Point {
            x: Some(x),
            y: Some(y),
        } => Ok(AnchorPosition {
            top: y + ANCHOR_GAP,
            left: *x,
        }),
        AnchorTarget::Point { .. } => Err(CoreError::InvalidInput(
            "anchor point needs both x and y".into(),
        )),
    }
}

/// Open/closed phase of an anchored panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPhase {
    Closed,
    Open,
}

#[derive(Debug)]
struct OpenAnchor {
    target: AnchorTarget,
    position: AnchorPosition,
}

type SharedAnchor = Rc<RefCell<Option<OpenAnchor>>>;

/// Viewport listeners held for as long as a panel is open.
/// Dropping the guard unregisters them.
struct ListenerGuard<V: Viewport> {
    viewport: Rc<V>,
    ids: Vec<ListenerId>,
}

impl<V: Viewport> Drop for ListenerGuard<V> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.viewport.remove_listener(id);
        }
    }
}

/// Keeps a floating panel positioned under its anchor.
///
/// `CLOSED -> OPEN` on [`open`](Self::open), which resolves the position
/// and subscribes to resize and capture-phase scroll so nested scroll
/// containers are covered. Every event re-resolves. [`close`](Self::close)
/// or dropping the anchor releases the subscriptions.
pub struct OverlayAnchor<V: Viewport + 'static> {
    viewport: Rc<V>,
    state: SharedAnchor,
    recomputes: Rc<RefCell<u64>>,
    guard: Option<ListenerGuard<V>>,
}

impl<V: Viewport + 'static> OverlayAnchor<V> {
    pub fn new(viewport: Rc<V>) -> Self {
        Self {
            viewport,
            state: Rc::new(RefCell::new(None)),
            recomputes: Rc::new(RefCell::new(0)),
            guard: None,
        }
    }

    /// Open the panel on `target`. Re-opening while open re-targets it.
    ///
    /// If the initial position cannot be resolved the anchor stays closed
    /// and no listener is registered.
    pub fn open(&mut self, target: AnchorTarget) -> Result<AnchorPosition, CoreError> {
        self.close();

        let position = resolve_position(self.viewport.as_ref(), &target)?;
        *self.recomputes.borrow_mut() += 1;
        *self.state.borrow_mut() = Some(OpenAnchor { target, position });

        let ids = [
            (ViewportEvent::Resize, false),
            (ViewportEvent::Scroll, true),
        ]
        .into_iter()
        .map(|(event, capture)| {
            self.viewport
                .add_listener(event, capture, self.make_listener(event))
        })
        .collect();

        self.guard = Some(ListenerGuard {
            viewport: Rc::clone(&self.viewport),
            ids,
        });
        debug!("overlay opened at {position:?}");
        Ok(position)
    }

    /// Close the panel and release its listeners. No-op when closed.
    pub fn close(&mut self) {
        if self.guard.take().is_some() {
            debug!("overlay closed");
        }
        *self.state.borrow_mut() = None;
    }

    /// Re-resolve now, as a viewport event would.
    pub fn recompute(&self) -> Option<AnchorPosition> {
        recompute(self.viewport.as_ref(), &self.state, &self.recomputes)
    }

    pub fn phase(&self) -> AnchorPhase {
        if self.state.borrow().is_some() {
            AnchorPhase::Open
        } else {
            AnchorPhase::Closed
        }
    }

    pub fn position(&self) -> Option<AnchorPosition> {
        self.state.borrow().as_ref().map(|s| s.position)
    }

    pub fn target(&self) -> Option<AnchorTarget> {
        self.state.borrow().as_ref().map(|s| s.target.clone())
    }

    /// Number of successful resolves since creation, including opens.
    pub fn recompute_count(&self) -> u64 {
        *self.recomputes.borrow()
    }

    fn make_listener(&self, event: ViewportEvent) -> Listener {
        let viewport: Weak<V> = Rc::downgrade(&self.viewport);
        let state: Weak<RefCell<Option<OpenAnchor>>> = Rc::downgrade(&self.state);
        let recomputes = Rc::downgrade(&self.recomputes);
        Rc::new(move || {
            let (Some(viewport), Some(state), Some(recomputes)) =
                (viewport.upgrade(), state.upgrade(), recomputes.upgrade())
            else {
                return;
            };
            debug!("overlay recompute on {event:?}");
            recompute(viewport.as_ref(), &state, &recomputes);
        })
    }
}

fn recompute<V: Viewport + ?Sized>(
    viewport: &V,
    state: &RefCell<Option<OpenAnchor>>,
    recomputes: &RefCell<u64>,
) -> Option<AnchorPosition> {
    let mut guard = state.borrow_mut();
    let open = guard.as_mut()?;
    match resolve_position(viewport, &open.target) {
        Ok(position) => {
            open.position = position;
            *recomputes.borrow_mut() += 1;
            Some(position)
        }
        Err(e) => {
            // Element went away mid-layout; keep the last good position.
            warn!("overlay recompute failed: {e}");
            Some(open.position)
        }
    }
}
