//! Aggregate output of a run: one outcome per work item.

use std::collections::BTreeMap;
use std::time::Duration;

use super::error::ItemError;
use super::item::ItemId;

pub type ItemResult<T, E> = Result<T, ItemError<E>>;

/// Result for one work item.
#[derive(Debug)]
pub struct ItemOutcome<T, E> {
    pub id: ItemId,
    pub label: String,
    pub result: ItemResult<T, E>,
}

impl<T, E> ItemOutcome<T, E> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a run produced. `outcomes` is ordered by `ItemId`, whatever
/// order the units actually finished in.
#[derive(Debug)]
pub struct RunReport<T, E> {
    pub outcomes: Vec<ItemOutcome<T, E>>,
    /// Wall time from first spawn to last join.
    pub elapsed: Duration,
    /// Most operations observed in flight at once.
    pub peak_in_flight: usize,
}

impl<T, E> RunReport<T, E> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Successful values with their labels, in item order.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &T)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|v| (o.label.as_str(), v)))
    }

    /// Failures with their labels, in item order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ItemError<E>)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.label.as_str(), e)))
    }

    /// Mapping from item identity to result.
    pub fn into_map(self) -> BTreeMap<ItemId, ItemResult<T, E>> {
        self.outcomes.into_iter().map(|o| (o.id, o.result)).collect()
    }
}
