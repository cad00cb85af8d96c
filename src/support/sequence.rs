use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Orders concurrent requests so only the response to the latest one is applied.
///
/// Each request takes a [`Ticket`] before it starts. When the response arrives it is applied only
/// if [`RequestSequence::is_current`] still holds for that ticket. Calling [`RequestSequence::next`]
/// or [`RequestSequence::invalidate`] makes every earlier ticket stale.
#[derive(Clone, Debug, Default)]
pub struct RequestSequence {
    latest: Arc<AtomicU64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::Relaxed);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let sequence = RequestSequence::new();

        let first = sequence.next();
        let second = sequence.next();

        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn out_of_order_responses_are_discarded() {
        let sequence = RequestSequence::new();
        let mut shown = None;

        let slow = sequence.next();
        let fast = sequence.next();

        for (ticket, quote) in [(fast, "2.0"), (slow, "1.0")] {
            if sequence.is_current(ticket) {
                shown = Some(quote);
            }
        }

        assert_eq!(shown, Some("2.0"));
    }

    #[test]
    fn invalidate_discards_in_flight_requests() {
        let sequence = RequestSequence::new();
        let pending = sequence.next();

        sequence.invalidate();

        assert!(!sequence.is_current(pending));
    }

    #[test]
    fn clones_share_the_counter() {
        let sequence = RequestSequence::new();
        let handle = sequence.clone();

        let ticket = sequence.next();
        handle.invalidate();

        assert!(!sequence.is_current(ticket));
    }
}
