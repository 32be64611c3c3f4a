//! Thread-break quick-time-event gate
//!
//! At most one QTE session is live at a time. The session resolves exactly
//! once: success if a qualifying input arrived before the window elapsed,
//! failure when the window runs out. "No input by window end" is a computed
//! outcome, not an error.

use crate::threads::ThreadRegistry;

/// One timed thread-break attempt.
#[derive(Debug, Clone)]
pub struct QteSession {
    pub target_thread_index: usize,
    pub started_at: f32,
    pub window_secs: f32,
    input_received: bool,
}

/// How a session resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QteOutcome {
    Success { thread_index: usize },
    Failure { thread_index: usize },
}

/// Owns the (at most one) live session.
#[derive(Debug, Default)]
pub struct QteGate {
    session: Option<QteSession>,
}

impl QteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&QteSession> {
        self.session.as_ref()
    }

    /// Open a session for `thread_index`. Rejected (logged no-op, returns
    /// false) when the index is invalid, the thread is already broken, or a
    /// session is already live.
    pub fn start(
        &mut self,
        registry: &ThreadRegistry,
        thread_index: usize,
        now: f32,
        window_secs: f32,
    ) -> bool {
        if self.session.is_some() {
            tracing::warn!(thread_index, "start_qte: a session is already active");
            return false;
        }
        if thread_index >= registry.total() {
            tracing::warn!(thread_index, "start_qte: index out of range");
            return false;
        }
        if !registry.is_intact(thread_index) {
            tracing::warn!(thread_index, "start_qte: thread already broken");
            return false;
        }

        self.session = Some(QteSession {
            target_thread_index: thread_index,
            started_at: now,
            window_secs,
            input_received: false,
        });
        true
    }

    /// Record a qualifying player input. Ignored when no session is live.
    pub fn notify_input(&mut self) {
        if let Some(session) = &mut self.session {
            session.input_received = true;
        }
    }

    /// Advance the live session. Returns the resolution when it happens;
    /// the session is cleared in the same call, so each session resolves
    /// exactly once. Input wins over a simultaneous window expiry.
    pub fn update(&mut self, now: f32) -> Option<QteOutcome> {
        let session = self.session.as_ref()?;
        let thread_index = session.target_thread_index;

        if session.input_received {
            self.session = None;
            return Some(QteOutcome::Success { thread_index });
        }
        if now - session.started_at >= session.window_secs {
            self.session = None;
            return Some(QteOutcome::Failure { thread_index });
        }
        None
    }

    /// Drop any live session without resolving it (encounter teardown).
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
