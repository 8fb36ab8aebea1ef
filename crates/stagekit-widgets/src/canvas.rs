#![forbid(unsafe_code)]

//! Free-form drawing entity.
//!
//! Every coordinate of a [`Shape`] is a [`Coordinate`], so one shape type
//! covers both pixel and fractional placement. Shapes are resolved against
//! the canvas' current size each time it paints.

use std::cell::RefCell;

use stagekit_core::Result;
use stagekit_core::geometry::{Point, Rect};
use stagekit_layout::{Axis, Coordinate};

use crate::Displayer;
use crate::draw::{Color, Painter, Primitive};
use crate::entity::Entity;

/// A drawing command in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: Coordinate,
        y: Coordinate,
        width: Coordinate,
        height: Coordinate,
        fill: Color,
    },
    Oval {
        x: Coordinate,
        y: Coordinate,
        width: Coordinate,
        height: Coordinate,
        fill: Color,
    },
    Line {
        from: (Coordinate, Coordinate),
        to: (Coordinate, Coordinate),
        color: Color,
        width: u32,
    },
    Text {
        x: Coordinate,
        y: Coordinate,
        text: String,
        color: Color,
    },
}

impl Shape {
    /// Pixel primitive for a canvas of `width` × `height`.
    #[must_use]
    pub fn resolve(&self, width: i32, height: i32) -> Primitive {
        let rx = |c: Coordinate| c.resolve(width);
        let ry = |c: Coordinate| c.resolve(height);
        let rect = |x, y, w, h| Rect::new(rx(x), ry(y), rx(w).max(0), ry(h).max(0));
        match self {
            Self::Rect {
                x,
                y,
                width: w,
                height: h,
                fill,
            } => Primitive::Rect {
                bounds: rect(*x, *y, *w, *h),
                fill: *fill,
            },
            Self::Oval {
                x,
                y,
                width: w,
                height: h,
                fill,
            } => Primitive::Oval {
                bounds: rect(*x, *y, *w, *h),
                fill: *fill,
            },
            Self::Line {
                from,
                to,
                color,
                width: stroke,
            } => Primitive::Line {
                from: Point::new(rx(from.0), ry(from.1)),
                to: Point::new(rx(to.0), ry(to.1)),
                color: *color,
                width: *stroke,
            },
            Self::Text { x, y, text, color } => Primitive::Text {
                origin: Point::new(rx(*x), ry(*y)),
                text: text.clone(),
                color: *color,
            },
        }
    }
}

/// An entity that paints a list of shapes.
#[derive(Debug, Default)]
pub struct Canvas {
    entity: Entity,
    shapes: RefCell<Vec<Shape>>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeSize`](stagekit_core::LayoutError) for
    /// negative sizes.
    pub fn with_size(width: Coordinate, height: Coordinate) -> Result<Self> {
        Ok(Self {
            entity: Entity::with_size(width, height)?,
            shapes: RefCell::new(Vec::new()),
        })
    }

    pub fn push(&self, shape: Shape) {
        self.shapes.borrow_mut().push(shape);
    }

    pub fn clear(&self) {
        self.shapes.borrow_mut().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.borrow().is_empty()
    }

    /// Shapes resolved against the current size, in paint order.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let node = self.entity.node();
        let (width, height) = (node.size(Axis::Horizontal), node.size(Axis::Vertical));
        self.shapes
            .borrow()
            .iter()
            .map(|s| s.resolve(width, height))
            .collect()
    }
}

impl Displayer for Canvas {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn draw_displayer(&self, painter: &mut Painter<'_>) {
        self.entity.render(painter);
        for primitive in self.primitives() {
            painter.draw(primitive);
        }
    }
}
