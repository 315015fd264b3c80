//! Stream relay — forwarding model output to the caller's channel.
//!
//! Consumes the provider's chunk stream and forwards each non-empty content
//! delta to the caller in arrival order, no buffering or coalescing. The
//! caller dropping its receiver is the sole cancellation path: the relay
//! stops consuming upstream immediately and does not drain the remainder.
//! Both channel halves owned here are dropped on return, so the output
//! channel closes exactly once on every exit path.

use swimdeck_core::error::ProviderError;
use swimdeck_core::provider::StreamChunk;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// How a relay run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The upstream stream was exhausted (or failed after output began).
    Completed,
    /// The consumer dropped its receiver before the stream was exhausted.
    ConsumerGone,
}

/// Relay content deltas from `upstream` into `output`.
///
/// An upstream error before any delta was forwarded is returned as `Err` so
/// the caller can produce a single error response. An error after output
/// began is reported best-effort as an inline `[error: ...]` marker followed
/// by a normal close; the caller already has partial output and the channel
/// contract forbids a second response.
pub async fn relay(
    mut upstream: mpsc::Receiver<Result<StreamChunk, ProviderError>>,
    output: mpsc::Sender<String>,
) -> Result<RelayOutcome, ProviderError> {
    let mut forwarded = false;

    while let Some(item) = upstream.recv().await {
        match item {
            Ok(chunk) => {
                if let Some(content) = chunk.content
                    && !content.is_empty()
                {
                    if output.send(content).await.is_err() {
                        debug!("Consumer dropped the output receiver, stopping relay");
                        return Ok(RelayOutcome::ConsumerGone);
                    }
                    forwarded = true;
                }
                if chunk.done {
                    break;
                }
            }
            Err(e) => {
                if !forwarded {
                    return Err(e);
                }
                warn!(error = %e, "Stream failed after output began, emitting inline marker");
                let _ = output.send(format!("[error: {e}]")).await;
                return Ok(RelayOutcome::Completed);
            }
        }
    }

    Ok(RelayOutcome::Completed)
}
