//! Item Id Allocation

use crate::config::IdStrategy;
use crate::domain::{DomainError, DomainResult, ItemId};

/// Issues ids that are unique within the store
///
/// Every id is strictly greater than anything issued before in this session
/// and than any id currently persisted. With `IdStrategy::Timestamp` ids also
/// track the wall clock, so an id freed by deleting the newest item in an
/// earlier session is not handed out again.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    strategy: IdStrategy,
    last_issued: Option<ItemId>,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            last_issued: None,
        }
    }

    /// Next id, given the ids currently persisted
    ///
    /// Fails with `Persistence` once no id above everything seen is left.
    pub fn next<I>(&mut self, existing: I) -> DomainResult<ItemId>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let mut candidate = match self.strategy {
            IdStrategy::Timestamp => chrono::Utc::now().timestamp_millis(),
            IdStrategy::Sequential => 0,
        };
        let floors = existing.into_iter().max().into_iter().chain(self.last_issued);
        for seen in floors {
            let above = seen
                .checked_add(1)
                .ok_or_else(|| DomainError::Persistence("item id space exhausted".to_string()))?;
            candidate = candidate.max(above);
        }
        self.last_issued = Some(candidate);
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_starts_at_zero() {
        let mut ids = IdAllocator::new(IdStrategy::Sequential);
        assert_eq!(ids.next(std::iter::empty()).unwrap(), 0);
        assert_eq!(ids.next(std::iter::empty()).unwrap(), 1);
    }

    #[test]
    fn sequential_skips_past_existing() {
        let mut ids = IdAllocator::new(IdStrategy::Sequential);
        assert_eq!(ids.next([3, 9, 4]).unwrap(), 10);
    }

    #[test]
    fn deleted_max_is_not_reused_in_session() {
        let mut ids = IdAllocator::new(IdStrategy::Sequential);
        let first = ids.next([0, 1]).unwrap();
        assert_eq!(first, 2);
        // item 2 deleted again; only 0 and 1 remain persisted
        assert_eq!(ids.next([0, 1]).unwrap(), 3);
    }

    #[test]
    fn timestamp_ids_follow_clock_and_stay_monotonic() {
        let before = chrono::Utc::now().timestamp_millis();
        let mut ids = IdAllocator::new(IdStrategy::Timestamp);
        let a = ids.next([0, 1, 2]).unwrap();
        let b = ids.next([0, 1, 2, a]).unwrap();
        assert!(a >= before);
        assert!(b > a);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let mut ids = IdAllocator::new(IdStrategy::Sequential);
        let err = ids.next([ItemId::MAX]).unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        // nothing was issued, so a smaller payload still works
        assert_eq!(ids.next([4]).unwrap(), 5);
    }
}
