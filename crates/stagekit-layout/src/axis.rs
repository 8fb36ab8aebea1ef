use serde::{Deserialize, Serialize};

/// Layout axis. Every operation on one axis is mirrored on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }

    /// Name of the size along this axis.
    #[must_use]
    pub const fn size_name(self) -> &'static str {
        self.pick("width", "height")
    }

    /// Select the horizontal or vertical variant of a label.
    #[inline]
    #[must_use]
    pub const fn pick(self, horizontal: &'static str, vertical: &'static str) -> &'static str {
        match self {
            Self::Horizontal => horizontal,
            Self::Vertical => vertical,
        }
    }
}

/// One of the two edges of an entity along an axis.
///
/// `Start` is left (horizontal) or top (vertical); `End` is right or bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    /// Center coordinate of an entity of `size` whose edge sits at `position`.
    #[inline]
    #[must_use]
    pub const fn center_from(self, position: i32, size: i32) -> i32 {
        match self {
            Self::Start => position.saturating_add(size / 2),
            Self::End => position.saturating_sub(size - size / 2),
        }
    }

    /// Position of this edge for an entity centered at `center`.
    ///
    /// The end edge is exclusive: it always sits `size` pixels past the
    /// start edge, so edge-to-edge neighbours touch without overlapping.
    #[inline]
    #[must_use]
    pub const fn position_from(self, center: i32, size: i32) -> i32 {
        match self {
            Self::Start => center.saturating_sub(size / 2),
            Self::End => center.saturating_add(size - size / 2),
        }
    }

    #[must_use]
    pub const fn name(self, axis: Axis) -> &'static str {
        match self {
            Self::Start => axis.pick("left", "top"),
            Self::End => axis.pick("right", "bottom"),
        }
    }
}
