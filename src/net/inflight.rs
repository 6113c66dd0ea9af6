//! Sequencing and cancellation for message-list loads.
//!
//! Every load takes a [`LoadTicket`] before its request goes out. A response
//! may only replace the rendered list if its ticket is still current: same
//! selection epoch, and issued after the last applied load. Switching contacts
//! bumps the epoch and aborts whatever is still pending, so a slow poll for the
//! previous contact can never overwrite the new conversation.

#[cfg(test)]
#[path = "inflight_test.rs"]
mod inflight_test;

use futures::future::{AbortHandle, AbortRegistration};

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    seq: u64,
}

/// Tracks issued, pending and applied loads.
#[derive(Debug, Default)]
pub struct InFlight {
    epoch: u64,
    next_seq: u64,
    applied_seq: u64,
    pending: Vec<(u64, AbortHandle)>,
}

impl InFlight {
    /// Issue a ticket and the registration used to make its request abortable.
    pub fn begin(&mut self) -> (LoadTicket, AbortRegistration) {
        self.next_seq += 1;
        let (handle, registration) = AbortHandle::new_pair();
        self.pending.push((self.next_seq, handle));
        let ticket = LoadTicket {
            epoch: self.epoch,
            seq: self.next_seq,
        };
        (ticket, registration)
    }

    /// Mark a load as finished. Returns `true` if its response should be applied.
    pub fn settle(&mut self, ticket: LoadTicket) -> bool {
        self.pending.retain(|(seq, _)| *seq != ticket.seq);
        if ticket.epoch != self.epoch || ticket.seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = ticket.seq;
        true
    }

    /// Start a new epoch, aborting every pending load. Returns how many were aborted.
    pub fn reset(&mut self) -> usize {
        self.epoch += 1;
        let aborted = self.pending.len();
        for (_, handle) in self.pending.drain(..) {
            handle.abort();
        }
        aborted
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
