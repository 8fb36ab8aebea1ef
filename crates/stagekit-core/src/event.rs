#![forbid(unsafe_code)]

//! Canonical input/event types delivered by the host.
//!
//! The host windowing backend translates its native events into [`Event`]s
//! with absolute window coordinates. Routing to entities is done by the
//! widget layer; nothing here knows about the event source.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Synthesised when a press and release land on the same target.
    Click(MouseButton),
    Move,
    Drag(MouseButton),
    /// Synthesised when the pointer starts hovering a target.
    Enter,
    /// Synthesised when the pointer stops hovering a target.
    Exit,
    Wheel { delta: i32 },
}

/// A pointer event at a position in the receiver's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Same event expressed in a frame whose origin is `origin`.
    #[must_use]
    pub const fn relative_to(self, origin: Point) -> Self {
        Self {
            kind: self.kind,
            position: self.position.relative_to(origin),
        }
    }

    /// Same position, different kind.
    #[must_use]
    pub const fn with_kind(self, kind: PointerKind) -> Self {
        Self {
            kind,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self { code }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The host window was resized to the given pixel size.
    Resize { width: i32, height: i32 },
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// Periodic timer tick.
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_pointer_keeps_kind() {
        let ev = PointerEvent::new(PointerKind::Down(MouseButton::Left), Point::new(50, 60));
        let local = ev.relative_to(Point::new(10, 20));
        assert_eq!(local.position, Point::new(40, 40));
        assert_eq!(local.kind, PointerKind::Down(MouseButton::Left));
    }
}
