//! Next-frame render scheduling with coalescing.
//!
//! Surfaces only report a usable size after the host has committed layout, so
//! drawing is deferred to the next frame. Every new request replaces the
//! pending one: however many changes land before the frame, it draws once.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

/// Identifies one scheduled render. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameTicket(pub u64);

/// Holds at most one pending render request.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    issued: u64,
    pending: Option<FrameTicket>,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a render for the next frame, replacing any pending one.
    pub fn request(&mut self) -> FrameTicket {
        self.issued += 1;
        let ticket = FrameTicket(self.issued);
        if let Some(prev) = self.pending.replace(ticket) {
            tracing::trace!(replaced = prev.0, ticket = ticket.0, "render request coalesced");
        }
        ticket
    }

    /// Drop the pending render, if any.
    pub fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    /// Claim the pending render at frame time. Returns `None` if nothing is due.
    pub fn take(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }
}
