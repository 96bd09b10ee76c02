//! Product id generation.

use chrono::Utc;

use stockdesk_core::ProductId;

/// Source of fresh product ids.
pub trait IdSource {
    fn next_id(&mut self) -> ProductId;
}

/// Wall-clock ids (milliseconds since the Unix epoch), strictly increasing
/// even when two products are added within the same millisecond.
#[derive(Debug, Default)]
pub struct ClockIds {
    last: Option<ProductId>,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for ClockIds {
    fn next_id(&mut self) -> ProductId {
        let now = ProductId::new(Utc::now().timestamp_millis());
        let id = match self.last {
            Some(last) if now <= last => last.successor(),
            _ => now,
        };
        self.last = Some(id);
        id
    }
}

/// Deterministic ids for tests and fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    next: ProductId,
}

impl SequentialIds {
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: ProductId::new(first),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ProductId {
        let id = self.next;
        self.next = id.successor();
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ids_are_strictly_increasing() {
        let mut ids = ClockIds::new();
        let mut previous = ids.next_id();
        for _ in 0..1_000 {
            let id = ids.next_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::starting_at(10);
        assert_eq!(ids.next_id(), ProductId::new(10));
        assert_eq!(ids.next_id(), ProductId::new(11));
    }
}
