//! Effect handler implementations.
//!
//! Handlers are plain async functions returning the `UiEvent` to feed back
//! into the reducer. The runtime spawns them and forwards the result to the inbox.

use std::time::{Duration, Instant};

use harbor_core::DaemonProbe;

use crate::events::UiEvent;

/// Runs the daemon probe once, bounded by `timeout`.
///
/// Probe failures become the display string here; they never escape as errors.
pub(crate) async fn probe_daemon(probe: DaemonProbe, timeout: Duration) -> UiEvent {
    let started = Instant::now();
    let result = probe.run(timeout).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(info) => {
            tracing::info!(
                version = %info.version,
                platform = %info.platform,
                elapsed_ms,
                "daemon probe succeeded"
            );
            UiEvent::ProbeCompleted(Ok(info))
        }
        Err(error) => {
            let message = format!("{error:#}");
            tracing::warn!(error = %message, elapsed_ms, "daemon probe failed");
            UiEvent::ProbeCompleted(Err(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use harbor_core::PROBE_TIMEOUT;

    use super::*;

    #[tokio::test]
    async fn test_probe_error_chain_is_flattened() {
        let probe = DaemonProbe::new(|_| async {
            Err(anyhow::anyhow!("connection refused").context("ping Docker daemon"))
        });

        let event = probe_daemon(probe, PROBE_TIMEOUT).await;

        let UiEvent::ProbeCompleted(Err(message)) = event else {
            panic!("expected probe failure");
        };
        assert_eq!(message, "ping Docker daemon: connection refused");
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_timeout_becomes_error_message() {
        let probe = DaemonProbe::new(|_| std::future::pending());

        let event = probe_daemon(probe, PROBE_TIMEOUT).await;

        let UiEvent::ProbeCompleted(Err(message)) = event else {
            panic!("expected probe failure");
        };
        assert_eq!(message, "daemon probe timed out after 3s");
    }
}
