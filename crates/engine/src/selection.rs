use gallery::FetchError;
use targets::collected::CollectedSet;

/// Monotonic identity of a selection change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionToken(u64);

/// Proof that a completion fetch was started for a given selection.
///
/// Only the ticket matching the most recently issued token may replace the
/// collected set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    token: SelectionToken,
    uid: String,
}

impl SelectionTicket {
    pub fn token(&self) -> SelectionToken {
        self.token
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The collected set was replaced.
    Applied,
    /// The fetch failed; the previous collected set stays authoritative.
    Failed(FetchError),
    /// A newer selection was made after this ticket was issued.
    Stale,
}

/// Last-writer-wins bookkeeping for the selected player.
#[derive(Debug, Default)]
pub struct SelectionState {
    latest: u64,
    selected_uid: Option<String>,
    collected: CollectedSet,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, uid: &str) -> SelectionTicket {
        self.latest += 1;
        tracing::debug!(uid = uid, token = self.latest, "selection started");
        SelectionTicket {
            token: SelectionToken(self.latest),
            uid: uid.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        ticket.token.0 == self.latest
    }

    pub fn complete(
        &mut self,
        ticket: &SelectionTicket,
        result: Result<CollectedSet, FetchError>,
    ) -> SelectionOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                uid = ticket.uid.as_str(),
                token = ticket.token.0,
                latest = self.latest,
                "discarding stale completion response"
            );
            return SelectionOutcome::Stale;
        }
        match result {
            Ok(collected) => {
                tracing::info!(
                    uid = ticket.uid.as_str(),
                    collected = collected.len(),
                    "selection applied"
                );
                self.collected = collected;
                self.selected_uid = Some(ticket.uid.clone());
                SelectionOutcome::Applied
            }
            Err(err) => SelectionOutcome::Failed(err),
        }
    }

    /// Logout: empties the set and invalidates every in-flight ticket.
    pub fn clear(&mut self) {
        self.latest += 1;
        self.selected_uid = None;
        self.collected = CollectedSet::new();
    }

    pub fn collected(&self) -> &CollectedSet {
        &self.collected
    }

    pub fn selected_uid(&self) -> Option<&str> {
        self.selected_uid.as_deref()
    }
}
