//! Docker Engine probe.
//!
//! Connects with the environment-derived settings (`DOCKER_HOST`,
//! `DOCKER_CERT_PATH`, ...), negotiates the API version, pings the daemon and
//! asks for its version. The client lives only for the duration of one call.

use anyhow::{Context, Result, bail};
use bollard::Docker;
use bollard::models::SystemVersion;
use tokio_util::sync::CancellationToken;

use crate::probe::DaemonInfo;

/// Probes the local Docker daemon.
///
/// # Errors
/// Returns an error if the daemon is unreachable, refuses API negotiation,
/// fails the liveness check, reports no version, or the token is cancelled.
pub async fn probe(cancel: CancellationToken) -> Result<DaemonInfo> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => bail!("daemon probe cancelled"),
        result = query_daemon() => result,
    }
}

async fn query_daemon() -> Result<DaemonInfo> {
    let docker = Docker::connect_with_defaults().context("connect to Docker daemon")?;
    let docker = docker
        .negotiate_version()
        .await
        .context("negotiate Docker API version")?;

    docker.ping().await.context("ping Docker daemon")?;

    let version = docker
        .version()
        .await
        .context("query Docker server version")?;

    let info = daemon_info(version)?;
    tracing::info!(version = %info.version, platform = %info.platform, "docker daemon reachable");
    Ok(info)
}

fn daemon_info(version: SystemVersion) -> Result<DaemonInfo> {
    let Some(server_version) = version.version.filter(|v| !v.is_empty()) else {
        bail!("Docker daemon reported no server version");
    };
    let Some(platform) = version.os.filter(|os| !os.is_empty()) else {
        bail!("Docker daemon reported no platform");
    };
    Ok(DaemonInfo {
        version: server_version,
        platform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daemon_info_maps_version_and_os() {
        let version = SystemVersion {
            version: Some("27.2.0".to_string()),
            os: Some("linux".to_string()),
            ..Default::default()
        };

        let info = daemon_info(version).unwrap();

        assert_eq!(info.version, "27.2.0");
        assert_eq!(info.platform, "linux");
    }

    #[test]
    fn test_daemon_info_rejects_missing_version() {
        let version = SystemVersion {
            os: Some("linux".to_string()),
            ..Default::default()
        };

        let err = daemon_info(version).unwrap_err();

        assert!(err.to_string().contains("no server version"));
    }

    #[test]
    fn test_daemon_info_rejects_empty_platform() {
        let version = SystemVersion {
            version: Some("27.2.0".to_string()),
            os: Some(String::new()),
            ..Default::default()
        };

        assert!(daemon_info(version).is_err());
    }

    #[tokio::test]
    async fn test_probe_stops_when_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = probe(cancel).await.unwrap_err();

        assert_eq!(err.to_string(), "daemon probe cancelled");
    }
}
