//! Optimistic endorsement / like counters.
//!
//! `endorse` applies the increment locally before the remote call is made and
//! hands back a [`MutationTicket`]. The caller performs the remote call and
//! passes the outcome to [`EndorsementBook::settle`]: success keeps the local
//! overlay as is, failure restores the exact pre-call overlay.
//!
//! There is no reconciliation with the remote counter after success; the
//! overlay stays authoritative for the rest of the session.

use std::collections::HashMap;

use awaken_types::SubjectId;
use awaken_types::ui::EndorsementOverlay;

use crate::remote::RemoteError;

/// Proof that an optimistic write is waiting for its remote outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket must be settled or the optimistic write never resolves"]
pub struct MutationTicket {
    subject: SubjectId,
    seq: u64,
}

impl MutationTicket {
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Confirmed,
    RolledBack,
    /// The ticket no longer matches a pending write.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    seq: u64,
    before: EndorsementOverlay,
}

#[derive(Debug, Clone, Default)]
struct Entry {
    overlay: EndorsementOverlay,
    pending: Option<Pending>,
}

#[derive(Debug, Default)]
pub struct EndorsementBook {
    entries: HashMap<SubjectId, Entry>,
    next_seq: u64,
}

impl EndorsementBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the remote count from the content feed. Ignored once the subject
    /// has a local overlay.
    pub fn seed(&mut self, subject: SubjectId, remote_count: u64) {
        self.entries.entry(subject).or_insert_with(|| Entry {
            overlay: EndorsementOverlay {
                count: remote_count,
                endorsed: false,
            },
            pending: None,
        });
    }

    /// Optimistically endorse. `None` if the subject is already endorsed.
    pub fn endorse(&mut self, subject: &SubjectId) -> Option<MutationTicket> {
        let entry = self.entries.entry(subject.clone()).or_default();
        if entry.overlay.endorsed {
            tracing::debug!(%subject, "already endorsed");
            return None;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        entry.pending = Some(Pending {
            seq,
            before: entry.overlay,
        });
        entry.overlay.endorsed = true;
        entry.overlay.count = entry.overlay.count.saturating_add(1);
        tracing::debug!(%subject, count = entry.overlay.count, "optimistic endorse");

        Some(MutationTicket {
            subject: subject.clone(),
            seq,
        })
    }

    /// Resolve an optimistic write with the remote outcome.
    pub fn settle(
        &mut self,
        ticket: MutationTicket,
        outcome: Result<(), RemoteError>,
    ) -> Settlement {
        let Some(entry) = self.entries.get_mut(&ticket.subject) else {
            return Settlement::Stale;
        };
        let Some(pending) = entry.pending.filter(|p| p.seq == ticket.seq) else {
            return Settlement::Stale;
        };
        entry.pending = None;

        match outcome {
            Ok(()) => Settlement::Confirmed,
            Err(e) => {
                tracing::warn!(subject = %ticket.subject, "Endorsement failed, reverting: {e}");
                entry.overlay = pending.before;
                Settlement::RolledBack
            }
        }
    }

    #[must_use]
    pub fn overlay(&self, subject: &SubjectId) -> EndorsementOverlay {
        self.entries
            .get(subject)
            .map(|entry| entry.overlay)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_pending(&self, subject: &SubjectId) -> bool {
        self.entries
            .get(subject)
            .is_some_and(|entry| entry.pending.is_some())
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.pending.is_some())
            .count()
    }
}
