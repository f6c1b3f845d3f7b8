use serde::Serialize;
use std::time::Duration;

/// Identifies one scheduled hover-leave. Only the most recent ticket can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LeaveTicket(u64);

#[derive(Debug, Clone, Copy)]
struct PendingLeave {
    ticket: LeaveTicket,
    due: Duration,
}

/// Defers hover-leave signals so pointer transit between adjacent targets
/// (row to marker, marker to row) does not flicker.
///
/// Times are offsets on the session clock. A `hover` within the window must
/// call [`LeaveDebouncer::cancel`]; the pending leave then never fires.
#[derive(Debug, Clone)]
pub struct LeaveDebouncer {
    window: Duration,
    generation: u64,
    pending: Option<PendingLeave>,
}

impl LeaveDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_immediate(&self) -> bool {
        self.window.is_zero()
    }

    /// Schedules a leave, superseding any previously pending one.
    pub fn schedule(&mut self, now: Duration) -> LeaveTicket {
        self.generation += 1;
        let ticket = LeaveTicket(self.generation);
        self.pending = Some(PendingLeave {
            ticket,
            due: now + self.window,
        });
        ticket
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn pending(&self) -> Option<LeaveTicket> {
        self.pending.map(|pending| pending.ticket)
    }

    /// Consumes the pending leave if `ticket` is still the current one.
    pub fn take_if_current(&mut self, ticket: LeaveTicket) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Consumes the pending leave if its deadline has passed.
    pub fn take_due(&mut self, now: Duration) -> Option<LeaveTicket> {
        match self.pending {
            Some(pending) if pending.due <= now => {
                self.pending = None;
                Some(pending.ticket)
            }
            _ => None,
        }
    }
}

/// Resolves after the debounce window so an async runtime can hand the
/// ticket back to [`crate::controller::Explorer::flush_leave`].
pub async fn leave_elapsed(ticket: LeaveTicket, window: Duration) -> LeaveTicket {
    tokio::time::sleep(window).await;
    ticket
}
