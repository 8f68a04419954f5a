//! Individual realtime connection
//!
//! A handle to one open socket: an id, a lifecycle state and the bounded
//! outbound queue drained by the socket's writer.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Notify};

use crate::protocol::Frame;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique connection identifier
pub type ConnectionId = u64;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    /// Upgrade finished, not yet registered
    Connecting,
    /// Registered under its addressee and receiving broadcasts
    Open,
    /// Terminal
    Closed,
}

/// Why a frame could not be queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("connection is closed")]
    Closed,
    #[error("outbound queue is full")]
    Full,
}

/// A single realtime connection
pub struct Connection {
    id: ConnectionId,
    state: Mutex<ConnectionState>,
    sender: mpsc::Sender<Frame>,
    last_activity: Mutex<Instant>,
    closed: Notify,
    created_at: Instant,
}

impl Connection {
    /// Create a connection in the `Connecting` state
    pub fn new(sender: mpsc::Sender<Frame>) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
            state: Mutex::new(ConnectionState::Connecting),
            sender,
            last_activity: Mutex::new(Instant::now()),
            closed: Notify::new(),
            created_at: Instant::now(),
        })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// `Connecting -> Open`. Returns false if the connection already closed.
    pub fn open(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            ConnectionState::Connecting => {
                *state = ConnectionState::Open;
                true
            }
            ConnectionState::Open => true,
            ConnectionState::Closed => false,
        }
    }

    /// Move to `Closed` and wake the socket task.
    ///
    /// Returns true only for the call that performed the transition.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock();
        if *state == ConnectionState::Closed {
            return false;
        }
        *state = ConnectionState::Closed;
        drop(state);
        self.closed.notify_one();
        true
    }

    /// Resolves once [`close`](Self::close) has been called
    pub async fn closed(&self) {
        if self.state() == ConnectionState::Closed {
            return;
        }
        self.closed.notified().await;
    }

    /// Queue a frame without waiting
    pub fn try_send(&self, frame: Frame) -> Result<(), SendError> {
        if self.state() == ConnectionState::Closed {
            return Err(SendError::Closed);
        }
        self.sender.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SendError::Full,
            mpsc::error::TrySendError::Closed(_) => SendError::Closed,
        })
    }

    /// Record traffic on the socket
    pub fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    /// Time since the last frame in either direction
    pub fn idle_for(&self) -> Duration {
        self.last_activity.lock().elapsed()
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("created_at", &self.created_at)
            .finish()
    }
}
