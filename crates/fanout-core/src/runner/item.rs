//! Work items: one per unit of work handed to the runner.

use std::fmt;

/// Position of an item in the caller's input. Stable identity for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One unit of work: identity, a human-readable label for logs and
/// reports, and the payload the operation consumes.
#[derive(Debug, Clone)]
pub struct WorkItem<I> {
    pub id: ItemId,
    pub label: String,
    pub payload: I,
}

impl<I> WorkItem<I> {
    pub fn new(id: ItemId, label: impl Into<String>, payload: I) -> Self {
        Self {
            id,
            label: label.into(),
            payload,
        }
    }
}

/// Number payloads in input order, labelling each with `label`.
pub fn work_items<I, L>(payloads: impl IntoIterator<Item = I>, label: L) -> Vec<WorkItem<I>>
where
    L: Fn(&I) -> String,
{
    payloads
        .into_iter()
        .enumerate()
        .map(|(i, payload)| WorkItem::new(ItemId(i), label(&payload), payload))
        .collect()
}
