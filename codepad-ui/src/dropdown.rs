//! Floating dropdown panels (language and theme pickers).
//!
//! The panel is placed in document coordinates just below its trigger. The
//! position is computed once when the panel opens and is not updated on
//! scroll or resize while it stays open. While open, a capture-phase
//! pointer-down listener closes it on any press outside the trigger and the
//! panel; the listener is removed as soon as the panel closes.

use serde::Serialize;

use crate::{Point, Rect, ScrollOffset};

/// Where to draw an open panel, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatingPanelRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
}

/// Placement rules for one kind of panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPolicy {
    /// Gap between the trigger's bottom edge and the panel.
    pub offset: f32,
    pub min_width: f32,
}

impl PanelPolicy {
    pub const LANGUAGE: Self = Self { offset: 8.0, min_width: 380.0 };
    pub const THEME: Self = Self { offset: 8.0, min_width: 320.0 };
}

/// Place a panel below `anchor` (the trigger's viewport rect).
pub fn compute_panel_rect(
    anchor: Rect,
    scroll: ScrollOffset,
    policy: PanelPolicy,
) -> FloatingPanelRect {
    FloatingPanelRect {
        top: anchor.bottom() + scroll.y + policy.offset,
        left: anchor.x + scroll.x,
        width: anchor.width.max(policy.min_width),
    }
}

/// Opaque handle for an installed pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Global capture-phase pointer-down subscriptions, provided by the host.
pub trait PointerListeners {
    fn install_capture(&mut self) -> ListenerId;
    fn remove(&mut self, id: ListenerId);
}

struct OpenPanel {
    trigger: Rect,
    rect: FloatingPanelRect,
    listener: ListenerId,
}

/// Open/close lifecycle of one dropdown.
pub struct DropdownController {
    policy: PanelPolicy,
    open: Option<OpenPanel>,
}

impl DropdownController {
    pub fn new(policy: PanelPolicy) -> Self {
        Self { policy, open: None }
    }

    pub fn language() -> Self {
        Self::new(PanelPolicy::LANGUAGE)
    }

    pub fn theme() -> Self {
        Self::new(PanelPolicy::THEME)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Panel placement, `None` while closed.
    pub fn rect(&self) -> Option<FloatingPanelRect> {
        self.open.as_ref().map(|panel| panel.rect)
    }

    /// Open below `trigger`. Already open: no-op, the position is kept.
    pub fn open(
        &mut self,
        trigger: Rect,
        scroll: ScrollOffset,
        listeners: &mut dyn PointerListeners,
    ) {
        if self.open.is_some() {
            return;
        }
        let rect = compute_panel_rect(trigger, scroll, self.policy);
        let listener = listeners.install_capture();
        tracing::trace!(?rect, "Dropdown opened");
        self.open = Some(OpenPanel { trigger, rect, listener });
    }

    /// Close and remove the outside-press listener. Closed: no-op.
    pub fn close(&mut self, listeners: &mut dyn PointerListeners) {
        if let Some(panel) = self.open.take() {
            listeners.remove(panel.listener);
            tracing::trace!("Dropdown closed");
        }
    }

    /// Trigger clicked.
    pub fn toggle(
        &mut self,
        trigger: Rect,
        scroll: ScrollOffset,
        listeners: &mut dyn PointerListeners,
    ) {
        if self.is_open() {
            self.close(listeners);
        } else {
            self.open(trigger, scroll, listeners);
        }
    }

    /// Route a captured pointer-down. Closes when the press lands outside
    /// both the trigger and `panel_bounds` (the rendered panel, if known).
    /// Returns whether the dropdown closed.
    pub fn on_pointer_down(
        &mut self,
        point: Point,
        panel_bounds: Option<Rect>,
        listeners: &mut dyn PointerListeners,
    ) -> bool {
        let Some(panel) = &self.open else {
            return false;
        };
        let inside = panel.trigger.contains(point)
            || panel_bounds.is_some_and(|bounds| bounds.contains(point));
        if inside {
            return false;
        }
        self.close(listeners);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host double tracking installed listeners.
    #[derive(Default)]
    struct Listeners {
        next: u64,
        active: Vec<ListenerId>,
        installed: usize,
    }

    impl PointerListeners for Listeners {
        fn install_capture(&mut self) -> ListenerId {
            self.next += 1;
            self.installed += 1;
            let id = ListenerId(self.next);
            self.active.push(id);
            id
        }

        fn remove(&mut self, id: ListenerId) {
            self.active.retain(|active| *active != id);
        }
    }

    fn trigger() -> Rect {
        // left 100, bottom 140, width 200
        Rect::new(100.0, 100.0, 200.0, 40.0)
    }

    // -------------------------------------------------------------------------
    // compute_panel_rect
    // -------------------------------------------------------------------------

    #[test]
    fn test_language_panel_rect() {
        let scroll = ScrollOffset::new(0.0, 50.0);
        let rect = compute_panel_rect(trigger(), scroll, PanelPolicy::LANGUAGE);
        assert_eq!(rect, FloatingPanelRect { top: 198.0, left: 100.0, width: 380.0 });
    }

    #[test]
    fn test_theme_panel_rect() {
        let rect = compute_panel_rect(trigger(), ScrollOffset::NONE, PanelPolicy::THEME);
        assert_eq!(rect, FloatingPanelRect { top: 148.0, left: 100.0, width: 320.0 });
    }

    #[test]
    fn test_narrow_trigger_at_y100_both_policies() {
        // Trigger at left 50, width 160, bottom edge at y = 100.
        let trigger = Rect::new(50.0, 70.0, 160.0, 30.0);
        let scroll = ScrollOffset::new(12.0, 40.0);

        let language = compute_panel_rect(trigger, scroll, PanelPolicy::LANGUAGE);
        assert_eq!(language, FloatingPanelRect { top: 148.0, left: 62.0, width: 380.0 });

        let theme = compute_panel_rect(trigger, scroll, PanelPolicy::THEME);
        assert_eq!(theme, FloatingPanelRect { top: 148.0, left: 62.0, width: 320.0 });

        let unscrolled = compute_panel_rect(trigger, ScrollOffset::NONE, PanelPolicy::THEME);
        assert_eq!(unscrolled, FloatingPanelRect { top: 108.0, left: 50.0, width: 320.0 });
    }

    #[test]
    fn test_wide_trigger_keeps_width() {
        let wide = Rect::new(0.0, 0.0, 500.0, 30.0);
        let rect = compute_panel_rect(wide, ScrollOffset::new(20.0, 0.0), PanelPolicy::LANGUAGE);
        assert_eq!(rect.width, 500.0);
        assert_eq!(rect.left, 20.0);
        assert_eq!(rect.top, 38.0);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_closed_by_default() {
        let dropdown = DropdownController::language();
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.rect(), None);
    }

    #[test]
    fn test_open_then_outside_click_closes() {
        let mut listeners = Listeners::default();
        let mut dropdown = DropdownController::language();

        dropdown.open(trigger(), ScrollOffset::new(0.0, 50.0), &mut listeners);
        let expected = FloatingPanelRect { top: 198.0, left: 100.0, width: 380.0 };
        assert_eq!(dropdown.rect(), Some(expected));
        assert_eq!(listeners.active.len(), 1);

        let panel = Rect::new(100.0, 148.0, 380.0, 300.0);
        let outside = Point::new(900.0, 900.0);
        let closed = dropdown.on_pointer_down(outside, Some(panel), &mut listeners);
        assert!(closed);
        assert!(!dropdown.is_open());
        assert!(listeners.active.is_empty());
    }

    #[test]
    fn test_click_inside_panel_or_trigger_keeps_open() {
        let mut listeners = Listeners::default();
        let mut dropdown = DropdownController::theme();
        dropdown.open(trigger(), ScrollOffset::NONE, &mut listeners);

        let panel = Rect::new(100.0, 148.0, 320.0, 200.0);
        assert!(!dropdown.on_pointer_down(Point::new(150.0, 200.0), Some(panel), &mut listeners));
        assert!(!dropdown.on_pointer_down(Point::new(150.0, 120.0), Some(panel), &mut listeners));
        assert!(dropdown.is_open());
        assert_eq!(listeners.active.len(), 1);
    }

    #[test]
    fn test_pointer_down_while_closed_is_ignored() {
        let mut listeners = Listeners::default();
        let mut dropdown = DropdownController::language();
        assert!(!dropdown.on_pointer_down(Point::new(0.0, 0.0), None, &mut listeners));
    }

    #[test]
    fn test_open_twice_keeps_position_and_single_listener() {
        let mut listeners = Listeners::default();
        let mut dropdown = DropdownController::language();
        dropdown.open(trigger(), ScrollOffset::NONE, &mut listeners);
        let first = dropdown.rect();

        let elsewhere = Rect::new(0.0, 0.0, 10.0, 10.0);
        dropdown.open(elsewhere, ScrollOffset::new(0.0, 999.0), &mut listeners);
        assert_eq!(dropdown.rect(), first);
        assert_eq!(listeners.installed, 1);
    }

    #[test]
    fn test_reopen_recomputes() {
        let mut listeners = Listeners::default();
        let mut dropdown = DropdownController::language();

        dropdown.toggle(trigger(), ScrollOffset::NONE, &mut listeners);
        assert_eq!(dropdown.rect().unwrap().top, 148.0);
        dropdown.toggle(trigger(), ScrollOffset::NONE, &mut listeners);
        assert!(!dropdown.is_open());

        dropdown.toggle(trigger(), ScrollOffset::new(0.0, 100.0), &mut listeners);
        assert_eq!(dropdown.rect().unwrap().top, 248.0);
        assert_eq!(listeners.installed, 2);
        assert_eq!(listeners.active.len(), 1);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut listeners = Listeners::default();
        let mut dropdown = DropdownController::language();
        dropdown.close(&mut listeners);
        assert!(listeners.active.is_empty());
    }
}
