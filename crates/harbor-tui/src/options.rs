//! Runtime options for the status display.

use std::time::Duration;

use harbor_core::{DaemonProbe, PROBE_TIMEOUT};

/// Options passed to [`crate::TuiRuntime`].
///
/// The probe defaults to the Docker daemon; tests swap in a stub.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub probe: DaemonProbe,
    pub probe_timeout: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            probe: DaemonProbe::default(),
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

impl AppOptions {
    #[must_use]
    pub fn with_probe(mut self, probe: DaemonProbe) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use harbor_core::DaemonInfo;

    use super::*;

    #[tokio::test]
    async fn test_with_probe_replaces_default() {
        let options = AppOptions::default().with_probe(DaemonProbe::new(|_| async {
            Ok(DaemonInfo {
                version: "27.2.0".to_string(),
                platform: "linux".to_string(),
            })
        }));

        let info = options.probe.run(options.probe_timeout).await.unwrap();

        assert_eq!(info.version, "27.2.0");
    }

    #[test]
    fn test_probe_timeout_defaults_and_overrides() {
        let options = AppOptions::default().with_probe_timeout(Duration::from_millis(500));
        assert_eq!(options.probe_timeout, Duration::from_millis(500));
        assert_eq!(AppOptions::default().probe_timeout, Duration::from_secs(3));
    }
}
