//! Automation boundary: runs script text and returns its raw output.
//!
//! Nothing above this layer looks at exit codes; callers only see the text
//! payload or an [`InvocationError`].

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::AutomationConfig;
use crate::error::InvocationError;

pub trait Automation: Send + Sync {
    fn run<'a>(&'a self, script: &'a str) -> BoxFuture<'a, Result<String, InvocationError>>;
}

/// Runs scripts through `osascript -e <script>` with a bounded wait.
#[derive(Debug, Clone)]
pub struct Osascript {
    program: String,
    timeout: Duration,
}

impl Osascript {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &AutomationConfig) -> Self {
        Self::new(cfg.program.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    async fn execute(&self, script: &str) -> Result<String, InvocationError> {
        let child = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .kill_on_drop(true)
            .output();

        // Dropping the future on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| InvocationError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("{} exited with {}: {}", self.program, output.status, stderr);
            return Err(InvocationError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Automation for Osascript {
    fn run<'a>(&'a self, script: &'a str) -> BoxFuture<'a, Result<String, InvocationError>> {
        self.execute(script).boxed()
    }
}
