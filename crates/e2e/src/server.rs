//! WebDriver process management - spawning and health checking chromedriver

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::SpawnConfig;
use crate::error::{E2eError, E2eResult};

/// Handle to a running WebDriver process
pub struct WebDriverProcess {
    child: Child,
    pub url: String,
    pub port: u16,
}

impl WebDriverProcess {
    /// Spawn the driver binary and wait until it reports ready
    pub async fn spawn(config: &SpawnConfig) -> E2eResult<Self> {
        let port = match config.port {
            Some(port) => port,
            None => find_free_port()?,
        };
        let url = format!("http://127.0.0.1:{}", port);

        info!("Spawning {} on port {}", config.binary.display(), port);

        let child = driver_command(&config.binary, port)
            .spawn()
            .map_err(|e| {
                E2eError::WebDriverStartup(format!(
                    "Failed to spawn {}: {}",
                    config.binary.display(),
                    e
                ))
            })?;

        let handle = WebDriverProcess { child, url, port };

        handle
            .wait_for_ready(Duration::from_millis(config.startup_timeout_ms))
            .await?;

        info!("WebDriver is ready at {}", handle.url);
        Ok(handle)
    }

    /// Poll `/status` until the driver accepts sessions
    async fn wait_for_ready(&self, timeout_duration: Duration) -> E2eResult<()> {
        let status_url = format!("{}/status", self.url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&status_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let body: serde_json::Value = resp.json().await?;
                    if is_ready(&body) {
                        return Ok(());
                    }
                }
                Ok(resp) => {
                    warn!("Status check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for WebDriver to start...");
                    }
                    // Connection refused is expected while the driver boots
                    if !e.is_connect() {
                        warn!("Status check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::WebDriverHealthCheck(attempts))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the driver process
    pub fn stop(&mut self) -> E2eResult<()> {
        info!("Stopping WebDriver (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for WebDriverProcess {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Driver invocation with stdout and stderr discarded
fn driver_command(binary: &Path, port: u16) -> Command {
    let mut command = Command::new(binary);
    command
        .arg(format!("--port={}", port))
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// W3C `/status` payload: `{"value": {"ready": true, ...}}`
fn is_ready(body: &serde_json::Value) -> bool {
    body.pointer("/value/ready")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

fn find_free_port() -> E2eResult<u16> {
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_free_port() {
        let port = find_free_port().unwrap();
        assert!(port > 1024);
    }

    #[test]
    fn test_status_payload() {
        assert!(is_ready(&json!({"value": {"ready": true, "message": "ChromeDriver ready"}})));
        assert!(!is_ready(&json!({"value": {"ready": false}})));
        assert!(!is_ready(&json!({})));
    }

    #[cfg(unix)]
    #[test]
    fn test_noisy_driver_does_not_block() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Instant;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("noisy-driver");
        std::fs::write(&script, "#!/bin/sh\nhead -c 1048576 /dev/zero >&2\nhead -c 1048576 /dev/zero\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut child = driver_command(&script, 9515).spawn().unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        let status = loop {
            if let Some(status) = child.try_wait().unwrap() {
                break Some(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                break None;
            }
            std::thread::sleep(Duration::from_millis(20));
        };
        assert!(status.is_some_and(|s| s.success()), "driver stalled writing output");
    }

    #[tokio::test]
    async fn test_missing_binary_is_startup_error() {
        let config = SpawnConfig {
            binary: "/nonexistent/chromedriver".into(),
            port: Some(1),
            startup_timeout_ms: 100,
        };
        let err = WebDriverProcess::spawn(&config).await.err().unwrap();
        assert!(matches!(err, E2eError::WebDriverStartup(_)));
    }
}
