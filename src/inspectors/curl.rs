use crate::config::FetchOptions;
use crate::inspectors::HeaderSource;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Reads headers with the system `curl -s -I -L`.
///
/// Every redirect hop is printed, so the text can hold several header
/// blocks. A call that outlives `timeout` is killed and yields no headers.
#[derive(Debug, Clone)]
pub struct CurlInspector {
    program: String,
    timeout: Duration,
}

impl Default for CurlInspector {
    fn default() -> Self {
        Self::new("curl")
    }
}

impl CurlInspector {
    /// Use a specific curl binary
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            timeout: FetchOptions::default().timeout,
        }
    }

    /// Limit each curl call, redirects included
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HeaderSource for CurlInspector {
    fn label(&self) -> &'static str {
        "curl -I"
    }

    async fn raw_headers(&self, url: &str) -> String {
        // Passed as an argv entry, never through a shell
        let max_time = format!("{:.3}", self.timeout.as_secs_f64());
        let child = Command::new(&self.program)
            .args(["-s", "-I", "-L", "--max-time", max_time.as_str(), url])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // curl enforces --max-time itself; the outer limit covers a wedged process
        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(output) => output,
            Err(_) => {
                ::log::warn!("{} timed out after {:?} for {}", self.program, self.timeout, url);
                return String::new();
            }
        };

        match output {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).into_owned()
            }
            Ok(output) => {
                ::log::warn!("{} exited with {} for {}", self.program, output.status, url);
                String::new()
            }
            Err(e) => {
                ::log::warn!("Failed to run {} for {}: {}", self.program, url, e);
                String::new()
            }
        }
    }
}
