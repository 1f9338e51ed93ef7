use crate::model::Bucket;
use crate::ops::moves::MoveDestination;

/// Where a drag is currently hovering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub bucket: Bucket,
    /// Unchecked item the drop would land before; `None` = end of bucket
    pub before_id: Option<String>,
}

/// State for one drag gesture, owned by the presentation layer.
///
/// Created on drag start and consumed on drop or cancel; nothing is
/// persisted and no list mutation happens here. The displayed order only
/// changes after the resulting move has been committed and the
/// authoritative collection comes back.
#[derive(Debug, Clone)]
pub struct DragSession {
    item_id: String,
    target: Option<DropTarget>,
}

impl DragSession {
    pub fn begin(item_id: impl Into<String>) -> DragSession {
        DragSession {
            item_id: item_id.into(),
            target: None,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    /// Update the hover target as the pointer moves.
    pub fn hover(&mut self, target: DropTarget) {
        self.target = Some(target);
    }

    /// The pointer left every valid target.
    pub fn leave(&mut self) {
        self.target = None;
    }

    /// Finish the gesture. Returns the move to apply, or `None` when the
    /// drop landed outside any valid target or on the item's own slot.
    pub fn finish(self) -> Option<(String, MoveDestination)> {
        let target = self.target?;
        if target.before_id.as_deref() == Some(self.item_id.as_str()) {
            return None;
        }
        Some((
            self.item_id,
            MoveDestination {
                bucket: Some(target.bucket),
                before_id: target.before_id,
            },
        ))
    }

    /// Abandon the gesture; no move is produced.
    pub fn cancel(self) {}
}
