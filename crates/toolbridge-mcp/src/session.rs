//! Session lifecycle for the stdio server.
//!
//! ```text
//! Uninitialized --bind--> Serving --begin_shutdown--> ShuttingDown --close--> Terminated
//! ```
//!
//! Requests are handled one at a time and only while `Serving`. The
//! shutdown token is checked before each new request is read; a request
//! already in flight runs to completion and its response is written before
//! the session stops.

use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

use crate::adapter::ProtocolAdapter;
use crate::error::McpError;
use crate::transport::StdioTransport;

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Serving,
    ShuttingDown,
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Serving => "serving",
            SessionState::ShuttingDown => "shutting down",
            SessionState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Why [`Session::serve`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The shutdown token was cancelled (SIGINT/SIGTERM).
    Signal,
    /// The client closed stdin.
    EndOfInput,
}

/// The single local-protocol session of a bridge process.
pub struct Session<R, W> {
    state: SessionState,
    adapter: ProtocolAdapter,
    transport: Option<StdioTransport<R, W>>,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a session with its handlers registered but no transport.
    pub fn new(adapter: ProtocolAdapter) -> Self {
        Self {
            state: SessionState::Uninitialized,
            adapter,
            transport: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Attach the transport and start accepting requests.
    pub fn bind(&mut self, transport: StdioTransport<R, W>) -> Result<(), McpError> {
        self.expect_state(SessionState::Uninitialized)?;
        self.transport = Some(transport);
        self.transition(SessionState::Serving);
        Ok(())
    }

    /// Serve requests until the token is cancelled or input ends.
    ///
    /// On return the session is `ShuttingDown`; call [`Session::close`] next.
    /// A transport error is returned as-is and leaves the state unchanged.
    pub async fn serve(&mut self, shutdown: &CancellationToken) -> Result<ShutdownReason, McpError> {
        self.expect_state(SessionState::Serving)?;
        let Some(transport) = self.transport.as_mut() else {
            return Err(McpError::InvalidState {
                expected: SessionState::Serving,
                actual: self.state,
            });
        };

        let reason = loop {
            let line = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break ShutdownReason::Signal,
                line = transport.next_message() => line?,
            };
            let Some(line) = line else {
                break ShutdownReason::EndOfInput;
            };

            if let Some(response) = self.adapter.handle_line(&line).await {
                transport.send(&response).await?;
            }
        };

        tracing::info!(?reason, "Session stopped accepting requests");
        self.begin_shutdown();
        Ok(reason)
    }

    /// Move to `ShuttingDown`. Returns `false` when shutdown had already
    /// begun, so repeated signals are no-ops.
    pub fn begin_shutdown(&mut self) -> bool {
        match self.state {
            SessionState::ShuttingDown | SessionState::Terminated => false,
            SessionState::Uninitialized | SessionState::Serving => {
                self.transition(SessionState::ShuttingDown);
                true
            }
        }
    }

    /// Close the transport and terminate. Idempotent.
    pub async fn close(&mut self) -> Result<(), McpError> {
        if self.state == SessionState::Terminated {
            return Ok(());
        }
        self.begin_shutdown();
        let result = match self.transport.take() {
            Some(transport) => transport.close().await,
            None => Ok(()),
        };
        self.transition(SessionState::Terminated);
        result
    }

    fn expect_state(&self, expected: SessionState) -> Result<(), McpError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(McpError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = %self.state, to = %next, "Session state change");
        self.state = next;
    }
}
