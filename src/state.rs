//! In-memory application state shared between handlers.
//!
//! Nothing here survives a restart — persistence is explicitly out of scope
//! for this service. The state exists so the dashboard can show the last
//! decision and a short history without re-computing.

use std::collections::VecDeque;

use crate::config::defaults::RECENT_DECISIONS_CAP;
use crate::types::DecisionRecord;

/// Mutable service state, shared as `Arc<RwLock<AppState>>` with the API.
#[derive(Debug, Default)]
pub struct AppState {
    /// Most recent decision, if any.
    pub last_decision: Option<DecisionRecord>,
    /// Bounded ring of recent decisions, newest first.
    pub recent: VecDeque<DecisionRecord>,
    /// Total decisions computed since startup (interactive + batch rows).
    pub decisions_total: u64,
}

impl AppState {
    /// Record a completed decision, trimming the ring to capacity.
    pub fn record(&mut self, record: DecisionRecord) {
        self.decisions_total += 1;
        self.last_decision = Some(record.clone());
        self.recent.push_front(record);
        while self.recent.len() > RECENT_DECISIONS_CAP {
            self.recent.pop_back();
        }
    }

    /// Count batch rows towards the total without flooding the ring.
    pub fn count_batch(&mut self, rows: u64) {
        self.decisions_total += rows;
    }
}
