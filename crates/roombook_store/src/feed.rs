use crate::models::BookingView;

/// Identifies one bookings fetch. Later fetches get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// The displayed bookings, guarded against out-of-order fetch results.
///
/// Only the answer to the most recently issued ticket is accepted; anything
/// older is dropped even if it resolves last.
#[derive(Debug, Default)]
pub struct BookingFeed {
    issued: u64,
    bookings: Vec<BookingView>,
}

impl BookingFeed {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Stores `bookings` if `ticket` is still current. Returns whether it was.
    pub fn accept(&mut self, ticket: Ticket, bookings: Vec<BookingView>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.bookings = bookings;
        true
    }

    /// Drops the bookings and invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.issue();
        self.bookings.clear();
    }

    pub fn bookings(&self) -> &[BookingView] {
        &self.bookings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{color_for, BookingId};
    use roombook_slots::LocalClock;

    fn view(id: &str) -> BookingView {
        BookingView {
            id: BookingId::new(id),
            room: "Wolf".to_string(),
            color: color_for("Wolf"),
            start: LocalClock::parse("2024-03-02T10:00:00").unwrap(),
            end: LocalClock::parse("2024-03-02T11:00:00").unwrap(),
        }
    }

    #[test]
    fn test_latest_ticket_wins_even_when_resolving_first() {
        let mut feed = BookingFeed::default();
        let sauna = feed.issue();
        let grill = feed.issue();

        assert!(feed.accept(grill, vec![view("2")]));
        assert!(!feed.accept(sauna, vec![view("1")]));
        assert_eq!(feed.bookings(), &[view("2")]);
    }

    #[test]
    fn test_reset_invalidates_outstanding_tickets() {
        let mut feed = BookingFeed::default();
        let ticket = feed.issue();
        feed.reset();
        assert!(!feed.accept(ticket, vec![view("1")]));
        assert!(feed.bookings().is_empty());
    }
}
