#![forbid(unsafe_code)]

//! Drawing surface abstraction.
//!
//! The host backend implements [`Surface`] and receives fully resolved,
//! window-space [`Primitive`]s. Displayers draw through a [`Painter`] in their
//! own local frame; the painter keeps a stack of origins and translates every
//! primitive before it reaches the surface.

use stagekit_core::geometry::{Point, Rect};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A pixel-space drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { bounds: Rect, fill: Color },
    Oval { bounds: Rect, fill: Color },
    Line { from: Point, to: Point, color: Color, width: u32 },
    Text { origin: Point, text: String, color: Color },
}

impl Primitive {
    /// Same primitive shifted by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        match self {
            Self::Rect { bounds, fill } => Self::Rect {
                bounds: bounds.translate(dx, dy),
                fill,
            },
            Self::Oval { bounds, fill } => Self::Oval {
                bounds: bounds.translate(dx, dy),
                fill,
            },
            Self::Line {
                from,
                to,
                color,
                width,
            } => Self::Line {
                from: from.offset(dx, dy),
                to: to.offset(dx, dy),
                color,
                width,
            },
            Self::Text {
                origin,
                text,
                color,
            } => Self::Text {
                origin: origin.offset(dx, dy),
                text,
                color,
            },
        }
    }
}

/// The host's drawing backend.
pub trait Surface {
    fn draw(&mut self, primitive: &Primitive);
}

/// Local-frame drawing handle over a [`Surface`].
pub struct Painter<'a> {
    surface: &'a mut dyn Surface,
    origin: Point,
    saved: Vec<Point>,
}

impl<'a> Painter<'a> {
    #[must_use]
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self {
            surface,
            origin: Point::default(),
            saved: Vec::new(),
        }
    }

    /// Window-space position of the current local origin.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Nesting depth of [`Painter::with_origin`] calls.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn draw(&mut self, primitive: Primitive) {
        let placed = primitive.translate(self.origin.x, self.origin.y);
        self.surface.draw(&placed);
    }

    /// Run `f` with the local origin moved to `offset` (in the current frame).
    pub fn with_origin<R>(&mut self, offset: Point, f: impl FnOnce(&mut Self) -> R) -> R {
        self.saved.push(self.origin);
        self.origin = self.origin.offset(offset.x, offset.y);
        let result = f(self);
        if let Some(previous) = self.saved.pop() {
            self.origin = previous;
        }
        result
    }

    pub fn fill_rect(&mut self, bounds: Rect, fill: Color) {
        self.draw(Primitive::Rect { bounds, fill });
    }

    pub fn fill_oval(&mut self, bounds: Rect, fill: Color) {
        self.draw(Primitive::Oval { bounds, fill });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color, width: u32) {
        self.draw(Primitive::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn text(&mut self, origin: Point, text: impl Into<String>, color: Color) {
        self.draw(Primitive::Text {
            origin,
            text: text.into(),
            color,
        });
    }
}

/// A surface that keeps every primitive it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    primitives: Vec<Primitive>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Drain recorded primitives.
    pub fn take(&mut self) -> Vec<Primitive> {
        std::mem::take(&mut self.primitives)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, primitive: &Primitive) {
        self.primitives.push(primitive.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_origins_accumulate_and_restore() {
        let mut surface = RecordingSurface::new();
        {
            let mut painter = Painter::new(&mut surface);
            painter.with_origin(Point::new(10, 20), |p| {
                p.with_origin(Point::new(5, 5), |p| {
                    assert_eq!(p.depth(), 2);
                    p.fill_rect(Rect::new(0, 0, 4, 4), Color::WHITE);
                });
                p.text(Point::new(1, 1), "hi", Color::BLACK);
            });
            assert_eq!(painter.origin(), Point::new(0, 0));
            assert_eq!(painter.depth(), 0);
        }
        assert_eq!(
            surface.primitives(),
            &[
                Primitive::Rect {
                    bounds: Rect::new(15, 25, 4, 4),
                    fill: Color::WHITE
                },
                Primitive::Text {
                    origin: Point::new(11, 21),
                    text: "hi".to_owned(),
                    color: Color::BLACK
                },
            ]
        );
    }

    #[test]
    fn line_endpoints_both_translate() {
        let line = Primitive::Line {
            from: Point::new(0, 0),
            to: Point::new(3, 4),
            color: Color::BLACK,
            width: 1,
        }
        .translate(-1, 2);
        assert_eq!(
            line,
            Primitive::Line {
                from: Point::new(-1, 2),
                to: Point::new(2, 6),
                color: Color::BLACK,
                width: 1
            }
        );
    }

    #[test]
    fn take_drains() {
        let mut surface = RecordingSurface::new();
        surface.draw(&Primitive::Oval {
            bounds: Rect::new(0, 0, 2, 2),
            fill: Color::TRANSPARENT,
        });
        assert_eq!(surface.take().len(), 1);
        assert!(surface.is_empty());
        assert!(!Color::TRANSPARENT.is_opaque());
    }
}
