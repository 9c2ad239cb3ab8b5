//! Dashboard supervisor
//!
//! Runs the dashboard as a child process of the API service with an explicit
//! lifecycle: start, health-check, stop.

use crate::config::DashboardConfig;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Errors raised while managing the dashboard process
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// The command could not be started
    #[error("Failed to spawn dashboard '{command}': {source}")]
    Spawn {
        /// Command that was attempted
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The process could not be killed
    #[error("Failed to stop dashboard: {0}")]
    Kill(#[source] std::io::Error),
}

/// Observed state of the dashboard process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardHealth {
    /// Process is alive
    Running,
    /// Process exited on its own (exit code, if any)
    Exited(Option<i32>),
    /// Process was stopped by the supervisor
    Stopped,
}

/// Handle to a supervised dashboard process
pub struct DashboardProcess {
    /// Child process handle; `None` once stopped
    child: Mutex<Option<Child>>,
    /// Command line, kept for logs
    command: String,
    /// OS process id at spawn time
    pid: Option<u32>,
}

impl DashboardProcess {
    /// Spawn the dashboard described by `config`
    ///
    /// The child receives `AGENT_API_URL` so it talks to this service.
    /// Its stderr is forwarded to the log line by line.
    pub fn start(config: &DashboardConfig) -> Result<Self, SupervisorError> {
        debug!(
            command = %config.command,
            args = ?config.args,
            api_url = %config.api_url,
            "Spawning dashboard process"
        );

        let mut child = Command::new(&config.command)
            .args(&config.args)
            .env("AGENT_API_URL", &config.api_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SupervisorError::Spawn {
                command: config.command.clone(),
                source,
            })?;

        let pid = child.id();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output(stdout, pid, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output(stderr, pid, "stderr"));
        }

        info!(command = %config.command, pid = ?pid, "Dashboard process started");

        Ok(Self {
            child: Mutex::new(Some(child)),
            command: config.command.clone(),
            pid,
        })
    }

    /// OS process id recorded at spawn time
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Report whether the process is alive, exited, or stopped
    pub async fn health_check(&self) -> DashboardHealth {
        let mut child_guard = self.child.lock().await;
        match child_guard.as_mut() {
            None => DashboardHealth::Stopped,
            Some(child) => match child.try_wait() {
                Ok(None) => DashboardHealth::Running,
                Ok(Some(status)) => DashboardHealth::Exited(status.code()),
                Err(e) => {
                    warn!(command = %self.command, error = %e, "Failed to poll dashboard process");
                    DashboardHealth::Exited(None)
                }
            },
        }
    }

    /// Check if the dashboard process is still running
    pub async fn is_running(&self) -> bool {
        self.health_check().await == DashboardHealth::Running
    }

    /// Kill the process and wait for it to exit
    ///
    /// Stopping an already-stopped or already-exited process is not an error.
    pub async fn stop(&self) -> Result<(), SupervisorError> {
        let mut child_guard = self.child.lock().await;
        let Some(mut child) = child_guard.take() else {
            return Ok(());
        };

        if let Ok(Some(status)) = child.try_wait() {
            debug!(command = %self.command, status = ?status, "Dashboard already exited");
            return Ok(());
        }

        child.kill().await.map_err(SupervisorError::Kill)?;
        info!(command = %self.command, pid = ?self.pid, "Dashboard process stopped");
        Ok(())
    }
}

/// Log each line the child writes to one of its output streams
async fn forward_output<R>(reader: R, pid: Option<u32>, stream: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        info!(pid = ?pid, stream = stream, line = %line, "Dashboard output");
    }
    debug!(pid = ?pid, stream = stream, "Dashboard output closed");
}

impl Drop for DashboardProcess {
    fn drop(&mut self) {
        // kill_on_drop covers the child; start_kill makes it immediate
        if let Ok(mut child_guard) = self.child.try_lock() {
            if let Some(mut child) = child_guard.take() {
                let _ = child.start_kill();
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(command: &str, args: &[&str]) -> DashboardConfig {
        DashboardConfig {
            enabled: true,
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            url: None,
            api_url: "http://127.0.0.1:1/messages".to_string(),
        }
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let process = DashboardProcess::start(&config("sleep", &["30"])).unwrap();
        assert!(process.pid().is_some());
        assert!(process.is_running().await);

        process.stop().await.unwrap();
        assert_eq!(process.health_check().await, DashboardHealth::Stopped);

        // Second stop is a no-op
        process.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let result = DashboardProcess::start(&config("definitely-not-a-real-binary-xyz", &[]));
        match result {
            Err(SupervisorError::Spawn { command, .. }) => {
                assert_eq!(command, "definitely-not-a-real-binary-xyz")
            }
            _ => panic!("expected spawn failure"),
        }
    }

    #[tokio::test]
    async fn test_output_is_drained() {
        // Writes more than a pipe buffer holds; it only exits if both streams are read
        let process = DashboardProcess::start(&config(
            "sh",
            &["-c", "yes | head -n 50000; yes | head -n 50000 >&2"],
        ))
        .unwrap();

        let mut health = process.health_check().await;
        for _ in 0..100 {
            if health != DashboardHealth::Running {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            health = process.health_check().await;
        }
        assert_eq!(health, DashboardHealth::Exited(Some(0)));
    }

    #[tokio::test]
    async fn test_exit_is_reported() {
        let process = DashboardProcess::start(&config("sh", &["-c", "exit 3"])).unwrap();

        let mut health = process.health_check().await;
        for _ in 0..50 {
            if health != DashboardHealth::Running {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            health = process.health_check().await;
        }
        assert_eq!(health, DashboardHealth::Exited(Some(3)));
    }

    #[tokio::test]
    async fn test_child_sees_api_url() {
        let process = DashboardProcess::start(&config(
            "sh",
            &["-c", "test \"$AGENT_API_URL\" = http://127.0.0.1:1/messages"],
        ))
        .unwrap();

        let mut health = process.health_check().await;
        for _ in 0..50 {
            if health != DashboardHealth::Running {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            health = process.health_check().await;
        }
        assert_eq!(health, DashboardHealth::Exited(Some(0)));
    }
}
