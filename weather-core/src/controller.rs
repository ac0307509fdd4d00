//! Query lifecycle state.
//!
//! [`QueryController`] is the only writer of the [`QuerySnapshot`]; readers
//! either copy it with [`QueryController::snapshot`] or follow changes through
//! a watch receiver.

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::{
    error::QueryFailure,
    icon::IconCategory,
    model::{CityQuery, WeatherRecord},
    provider::WeatherProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

/// Result of the most recent completed query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success(WeatherRecord),
    Failed(QueryFailure),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySnapshot {
    /// Text currently staged in the input field.
    pub input: String,
    pub phase: QueryPhase,
    pub outcome: Option<QueryOutcome>,
    /// Sequence number of the latest accepted submission; 0 before any.
    pub sequence: u64,
}

impl QuerySnapshot {
    pub fn record(&self) -> Option<&WeatherRecord> {
        match &self.outcome {
            Some(QueryOutcome::Success(record)) => Some(record),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&QueryFailure> {
        match &self.outcome {
            Some(QueryOutcome::Failed(failure)) => Some(failure),
            _ => None,
        }
    }

    /// Icon for the displayed record, if any.
    pub fn icon(&self) -> Option<IconCategory> {
        self.record()
            .map(|record| IconCategory::classify(record.feels_like_c))
    }

    pub fn is_pending(&self) -> bool {
        self.phase == QueryPhase::Pending
    }
}

pub struct QueryController<P> {
    provider: P,
    state: watch::Sender<QuerySnapshot>,
}

impl<P: WeatherProvider> QueryController<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(QuerySnapshot::default());
        Self { provider, state }
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.state.subscribe()
    }

    /// Stage input text without submitting it.
    pub fn set_input(&self, text: &str) {
        self.state.send_if_modified(|snap| {
            if snap.input == text {
                return false;
            }
            snap.input = text.to_string();
            true
        });
    }

    /// Submit a city and wait for its outcome.
    ///
    /// Blank input is ignored and returns `None`. Otherwise returns the
    /// sequence number assigned to this submission. The outcome is applied
    /// only if no newer submission was accepted in the meantime.
    #[instrument(skip(self))]
    pub async fn submit(&self, raw_input: &str) -> Option<u64> {
        let Ok(city) = CityQuery::parse(raw_input) else {
            debug!("ignoring blank submission");
            return None;
        };

        let mut sequence = 0;
        self.state.send_modify(|snap| {
            snap.sequence += 1;
            sequence = snap.sequence;
            snap.input = raw_input.to_string();
            snap.phase = QueryPhase::Pending;
            // A displayed record stays until replaced; a displayed error does not.
            if matches!(snap.outcome, Some(QueryOutcome::Failed(_))) {
                snap.outcome = None;
            }
        });
        debug!(sequence, "query pending");

        let result = self.provider.fetch_weather(&city).await;

        let applied = self.state.send_if_modified(|snap| {
            if snap.sequence != sequence {
                return false;
            }
            match result {
                Ok(record) => {
                    info!(sequence, location = %record.location_name, "query succeeded");
                    snap.phase = QueryPhase::Success;
                    snap.outcome = Some(QueryOutcome::Success(record));
                    snap.input.clear();
                }
                Err(failure) => {
                    info!(sequence, kind = %failure.kind(), "query failed");
                    snap.phase = QueryPhase::Failed;
                    snap.outcome = Some(QueryOutcome::Failed(failure));
                }
            }
            true
        });

        if !applied {
            debug!(sequence, "discarding superseded response");
        }

        Some(sequence)
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for QueryController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("provider", &self.provider)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
