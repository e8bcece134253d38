#![forbid(unsafe_code)]

//! Submission delivery: the sink contract and the driver that pumps session
//! effects through it.

use std::fmt;

use async_trait::async_trait;

use crate::session::{Effect, FormEvent, FormSession};
use crate::submission::FlightSubmission;

// ---------------------------------------------------------------------------
// SinkError
// ---------------------------------------------------------------------------

/// Why a submission attempt did not land.
///
/// The distinction matters only for logs; the session maps every variant to
/// the same user-facing failure.
#[derive(Debug)]
pub enum SinkError {
    /// The request never completed (connection refused, DNS, timeout, ...).
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// The endpoint answered with a non-success HTTP status.
    Status(u16),
}

impl SinkError {
    /// Wrap a transport-level failure.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport failure: {err}"),
            Self::Status(status) => write!(f, "endpoint returned status {status}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err.as_ref()),
            Self::Status(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SubmissionSink
// ---------------------------------------------------------------------------

/// Accepts one validated submission per call.
///
/// Implementations deliver the payload somewhere (HTTP in production, a
/// recording fake in tests). The engine treats the sink as a black box: it
/// never retries, and any error leads to the same failed state.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Deliver `submission`; `Ok(())` means the endpoint accepted it.
    async fn submit(&self, submission: &FlightSubmission) -> Result<(), SinkError>;
}

// ---------------------------------------------------------------------------
// SessionDriver
// ---------------------------------------------------------------------------

/// Owns a [`FormSession`] and a sink, and runs submission effects to
/// completion.
///
/// `dispatch` holds `&mut self` across the sink await, so one session can
/// never have two requests in flight. There is no cancellation: once a
/// submission starts it runs to success or failure.
pub struct SessionDriver<S> {
    session: FormSession,
    sink: S,
}

impl<S: SubmissionSink> SessionDriver<S> {
    /// Pair a session with a sink.
    #[must_use]
    pub fn new(session: FormSession, sink: S) -> Self {
        Self { session, sink }
    }

    /// The driven session, for inspection.
    #[must_use]
    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// The sink the driver delivers through.
    #[must_use]
    pub fn sink_ref(&self) -> &S {
        &self.sink
    }

    /// Apply one event; when it starts a submission, await the sink and feed
    /// the outcome back into the session.
    pub async fn dispatch(&mut self, event: FormEvent) {
        match self.session.apply(event) {
            Effect::None => {}
            Effect::Submit(submission) => match self.sink.submit(&submission).await {
                Ok(()) => {
                    tracing::info!("submission delivered");
                    self.session.apply(FormEvent::SinkSucceeded);
                }
                Err(err) => {
                    tracing::error!("submission failed: {err}");
                    self.session.apply(FormEvent::SinkFailed);
                }
            },
        }
    }

    /// Take the session back, dropping the sink.
    #[must_use]
    pub fn into_session(self) -> FormSession {
        self.session
    }
}
