use stagekit_core::NodeId;
use stagekit_core::reactive::{Observable, WeakObservable};

use crate::axis::Axis;

/// Non-owning view of a container's width and height.
///
/// Children resolve fractional coordinates against it. Holding an `Extent`
/// does not keep the container alive; once it is gone, [`Extent::along`]
/// returns `None` and fractional values stay at their last resolution.
#[derive(Debug, Clone)]
pub struct Extent {
    width: WeakObservable<i32>,
    height: WeakObservable<i32>,
    owner: Option<NodeId>,
}

impl Extent {
    #[must_use]
    pub fn new(width: &Observable<i32>, height: &Observable<i32>) -> Self {
        Self {
            width: width.downgrade(),
            height: height.downgrade(),
            owner: None,
        }
    }

    /// Tag the extent with the id of the container that provides it.
    #[must_use]
    pub fn owned_by(mut self, owner: NodeId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Current extent along `axis`.
    #[must_use]
    pub fn along(&self, axis: Axis) -> Option<i32> {
        let source = match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        };
        source.upgrade().map(|o| o.get())
    }
}
