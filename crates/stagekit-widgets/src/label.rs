#![forbid(unsafe_code)]

//! Single-line text entity whose width follows its content.

use std::cell::{Cell, RefCell};

use stagekit_core::geometry::Point;
use stagekit_layout::Axis;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::Displayer;
use crate::draw::{Color, Painter};
use crate::entity::Entity;

/// Display columns of `text`, counting each grapheme cluster once.
#[must_use]
pub fn display_width(text: &str) -> u32 {
    text.graphemes(true)
        .map(|g| UnicodeWidthStr::width(g) as u32)
        .sum()
}

/// A text label sized at `display columns × advance` by `line height`.
///
/// Changing the text changes the width, which re-pins any edge alignment on
/// the label and propagates to entities aligned to it.
#[derive(Debug)]
pub struct Label {
    entity: Entity,
    text: RefCell<String>,
    advance: Cell<u32>,
    line_height: Cell<u32>,
    color: Cell<Color>,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>, advance: u32) -> Self {
        let label = Self {
            entity: Entity::new(),
            text: RefCell::new(text.into()),
            advance: Cell::new(advance),
            line_height: Cell::new(advance.saturating_mul(2)),
            color: Cell::new(Color::BLACK),
        };
        label.measure();
        label
    }

    #[must_use]
    pub fn with_color(self, color: Color) -> Self {
        self.color.set(color);
        self
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        if *self.text.borrow() == text {
            return;
        }
        *self.text.borrow_mut() = text;
        self.measure();
    }

    /// Glyph advance in pixels per display column.
    pub fn set_advance(&self, advance: u32) {
        self.advance.set(advance);
        self.measure();
    }

    pub fn set_line_height(&self, line_height: u32) {
        self.line_height.set(line_height);
        self.measure();
    }

    fn measure(&self) {
        let width = display_width(&self.text.borrow()).saturating_mul(self.advance.get());
        let node = self.entity.node();
        node.set_size_px(Axis::Horizontal, width);
        node.set_size_px(Axis::Vertical, self.line_height.get());
    }
}

impl Displayer for Label {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn draw_displayer(&self, painter: &mut Painter<'_>) {
        self.entity.render(painter);
        painter.text(Point::new(0, 0), self.text(), self.color.get());
    }

    fn initialize(&self) {
        self.measure();
    }
}
