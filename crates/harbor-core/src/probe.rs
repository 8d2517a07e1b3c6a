//! Daemon status probe.
//!
//! A probe is a function-valued handle that contacts the daemon once and
//! reports its version and platform. The runtime never calls the inner
//! function directly; it goes through [`DaemonProbe::run`], which enforces
//! the time budget and cancels the probe when the budget runs out.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::docker;

/// Time budget for a single daemon probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Successful probe payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonInfo {
    /// Server version reported by the daemon (e.g. `27.2.0`).
    pub version: String,
    /// Operating system the daemon runs on (e.g. `linux`).
    pub platform: String,
}

type ProbeFn = dyn Fn(CancellationToken) -> BoxFuture<'static, Result<DaemonInfo>> + Send + Sync;

/// Injectable daemon probe.
///
/// Defaults to [`docker::probe`]. Tests substitute a stub with [`DaemonProbe::new`].
#[derive(Clone)]
pub struct DaemonProbe {
    inner: Arc<ProbeFn>,
}

impl DaemonProbe {
    /// Wraps an async function as a probe.
    ///
    /// The function receives a token that is cancelled when the time budget
    /// expires. Its future is dropped at the same moment, so anything it
    /// holds (connections, sockets) is released on every exit path.
    pub fn new<F, Fut>(probe: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<DaemonInfo>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |cancel| probe(cancel).boxed()),
        }
    }

    /// The Docker Engine probe.
    pub fn docker() -> Self {
        Self::new(docker::probe)
    }

    /// Runs the probe once, bounded by `timeout`.
    ///
    /// # Errors
    /// Returns the probe's own error, or a timeout error when the budget
    /// elapses first.
    pub async fn run(&self, timeout: Duration) -> Result<DaemonInfo> {
        let cancel = CancellationToken::new();
        let probe = (self.inner)(cancel.clone());

        tracing::debug!(timeout_ms = timeout.as_millis() as u64, "probing daemon");

        tokio::select! {
            result = probe => result,
            () = tokio::time::sleep(timeout) => {
                cancel.cancel();
                Err(anyhow!("daemon probe timed out after {timeout:?}"))
            }
        }
    }
}

impl Default for DaemonProbe {
    fn default() -> Self {
        Self::docker()
    }
}

impl fmt::Debug for DaemonProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaemonProbe").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    fn linux_info() -> DaemonInfo {
        DaemonInfo {
            version: "27.2.0".to_string(),
            platform: "linux".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_returns_probe_result() {
        let probe = DaemonProbe::new(|_| async { Ok(linux_info()) });

        let info = probe.run(PROBE_TIMEOUT).await.unwrap();

        assert_eq!(info, linux_info());
    }

    #[tokio::test]
    async fn test_run_passes_probe_error_through() {
        let probe = DaemonProbe::new(|_| async { Err(anyhow!("boom")) });

        let err = probe.run(PROBE_TIMEOUT).await.unwrap_err();

        assert_eq!(format!("{err:#}"), "boom");
    }

    #[tokio::test]
    async fn test_run_invokes_probe_once_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let probe = DaemonProbe::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(linux_info()) }
        });

        probe.run(PROBE_TIMEOUT).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out_and_releases_probe() {
        let released = Arc::new(AtomicBool::new(false));
        let token = Arc::new(Mutex::new(None::<CancellationToken>));
        let released_flag = Arc::clone(&released);
        let token_slot = Arc::clone(&token);
        let probe = DaemonProbe::new(move |cancel: CancellationToken| {
            *token_slot.lock().unwrap() = Some(cancel);
            let guard = SetOnDrop(Arc::clone(&released_flag));
            async move {
                let _guard = guard;
                std::future::pending::<Result<DaemonInfo>>().await
            }
        });

        let err = probe.run(PROBE_TIMEOUT).await.unwrap_err();

        assert_eq!(err.to_string(), "daemon probe timed out after 3s");
        assert!(released.load(Ordering::SeqCst));
        let token = token.lock().unwrap().take().unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_sub_second_timeout() {
        let probe = DaemonProbe::new(|_| std::future::pending::<Result<DaemonInfo>>());

        let err = probe.run(Duration::from_millis(500)).await.unwrap_err();

        assert_eq!(err.to_string(), "daemon probe timed out after 500ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_finishes_before_deadline() {
        let probe = DaemonProbe::new(|_| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(linux_info())
        });

        let info = probe.run(PROBE_TIMEOUT).await.unwrap();

        assert_eq!(info.platform, "linux");
    }
}
