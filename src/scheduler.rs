//! Engine-owned timing: deferred transitions and a whole-second clock.
//!
//! Nothing here reads a clock. Callers pass `now_ms` (`performance.now()` in
//! the browser) and the engine decides what became due.

/// Handle for a scheduled transition, used to cancel it individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

struct Deferred<E> {
    due_ms: f64,
    ticket: Ticket,
    event: E,
}

/// Queue of delayed transitions. `cancel_all` drops everything in flight, so a
/// transition scheduled for a previous game can never fire into a new one.
pub struct Scheduler<E> {
    pending: Vec<Deferred<E>>,
    next_ticket: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn schedule(&mut self, at_ms: f64, delay_ms: f64, event: E) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.push(Deferred {
            due_ms: at_ms + delay_ms,
            ticket,
            event,
        });
        ticket
    }

    /// Returns true if the ticket was still pending.
    pub fn cancel(&mut self, ticket: Ticket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|d| d.ticket != ticket);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest transition due at `now_ms`, with its due time. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, E)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, d)| d.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then(a.ticket.0.cmp(&b.ticket.0))
            })
            .map(|(i, _)| i)?;
        let d = self.pending.remove(idx);
        Some((d.due_ms, d.event))
    }
}

/// Counts whole seconds since `start`, one step per crossed boundary.
#[derive(Clone, Copy, Debug)]
pub struct SecondClock {
    start_ms: f64,
    last_whole: i64, // index of last processed whole second
}

impl SecondClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            last_whole: 0,
        }
    }

    /// Number of whole seconds crossed since the previous call.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let whole = ((now_ms - self.start_ms) / 1000.0).floor() as i64;
        if whole <= self.last_whole {
            return 0;
        }
        let crossed = whole - self.last_whole;
        self.last_whole = whole;
        crossed as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_order_then_fifo() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 500.0, "late");
        s.schedule(0.0, 100.0, "a");
        s.schedule(0.0, 100.0, "b");
        assert_eq!(s.pop_due(50.0), None);
        assert_eq!(s.pop_due(1000.0), Some((100.0, "a")));
        assert_eq!(s.pop_due(1000.0), Some((100.0, "b")));
        assert_eq!(s.pop_due(1000.0), Some((500.0, "late")));
        assert!(s.is_idle());
    }

    #[test]
    fn cancel_all_drops_in_flight() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 10.0, 1);
        s.cancel_all();
        assert_eq!(s.pop_due(100.0), None);
    }

    #[test]
    fn cancel_single_ticket() {
        let mut s = Scheduler::new();
        let t = s.schedule(0.0, 10.0, 1);
        s.schedule(0.0, 20.0, 2);
        assert!(s.cancel(t));
        assert!(!s.cancel(t));
        assert_eq!(s.pop_due(100.0), Some((20.0, 2)));
    }

    #[test]
    fn second_clock_counts_crossed_boundaries() {
        let mut c = SecondClock::new(1_000.0);
        assert_eq!(c.advance(1_999.0), 0);
        assert_eq!(c.advance(2_000.0), 1);
        assert_eq!(c.advance(2_500.0), 0);
        assert_eq!(c.advance(5_100.0), 3);
    }
}
