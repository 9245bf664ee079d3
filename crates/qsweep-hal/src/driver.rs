//! Warm subprocess driver protocol.
//!
//! Interpreter-hosted backends (Qiskit, Cirq) pay seconds of import and
//! circuit-construction cost that must stay out of the timed window. The
//! [`PyDriver`] protocol keeps one subprocess alive per trial: the driver
//! script loads its simulator, builds the circuit from the interchange
//! document, then answers line-oriented commands on stdio.
//!
//! ```text
//!   harness                          driver
//!   ───────                          ──────
//!   spawn program script circuit ──→ imports, builds circuit
//!                                ←── "READY[ detail]"  (or "FATAL msg")
//!   "RUN\n"                      ──→ one complete execution
//!                                ←── "OK <ms>"         (or "ERR msg")
//!   "EXIT\n"                     ──→ exits
//! ```
//!
//! The driver-side milliseconds are diagnostic only; the harness measures
//! its own wall clock around each RUN exchange.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::adapter::PROBE_TIMEOUT;
use crate::error::{AdapterError, AdapterResult};

/// Environment variable naming the Python interpreter.
pub const PYTHON_ENV: &str = "QSWEEP_PYTHON";

/// Upper bound on driver startup (imports plus circuit construction).
/// The sweep's own trial timeout usually cuts in first.
pub const READY_TIMEOUT: Duration = Duration::from_secs(120);

/// How long `shutdown` waits after EXIT before killing the driver.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

const CMD_RUN: &[u8] = b"RUN\n";
const CMD_EXIT: &[u8] = b"EXIT\n";
const REPLY_READY: &str = "READY";
const REPLY_OK: &str = "OK";
const REPLY_ERR: &str = "ERR";
const REPLY_FATAL: &str = "FATAL";

/// The Python interpreter to drive, from `QSWEEP_PYTHON` or `python3`.
pub fn python_program() -> String {
    std::env::var(PYTHON_ENV).unwrap_or_else(|_| "python3".to_string())
}

/// A live driver subprocess holding a warmed-up simulator.
#[derive(Debug)]
pub struct PyDriver {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
    detail: Option<String>,
    // Keeps the script and circuit files alive for the child's lifetime.
    _scratch: tempfile::TempDir,
}

impl PyDriver {
    /// Write `script` and `circuit_json` into a scratch directory, spawn
    /// `program <script> <circuit>` and wait for its READY line.
    ///
    /// A missing or unrunnable program and a FATAL reply (the driver could
    /// not import its simulator) both surface as
    /// [`AdapterError::Unsupported`].
    pub async fn spawn(
        program: &str,
        script: &str,
        circuit_json: &str,
        ready_timeout: Duration,
    ) -> AdapterResult<Self> {
        let scratch = tempfile::TempDir::new()?;
        let script_path = scratch.path().join("driver.py");
        let circuit_path = scratch.path().join("circuit.json");
        tokio::fs::write(&script_path, script).await?;
        tokio::fs::write(&circuit_path, circuit_json).await?;

        debug!(%program, script = %script_path.display(), "spawning driver");

        let mut child = Command::new(program)
            .arg(&script_path)
            .arg(&circuit_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AdapterError::Unsupported(format!("{program} not runnable: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AdapterError::Protocol("driver stdin not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AdapterError::Protocol("driver stdout not captured".into()))?;
        if let Some(stderr) = child.stderr.take() {
            let label = program.to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(driver = %label, "{line}");
                }
            });
        }

        let mut driver = Self {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
            detail: None,
            _scratch: scratch,
        };

        let first = timeout(ready_timeout, driver.next_line())
            .await
            .map_err(|_| {
                AdapterError::Backend(format!(
                    "driver startup exceeded {}s",
                    ready_timeout.as_secs()
                ))
            })??;
        driver.detail = parse_ready(&first)?;
        Ok(driver)
    }

    /// Optional token the driver appended to READY, e.g. which simulation
    /// engine it picked.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Request one complete execution and wait for the reply.
    pub async fn run_once(&mut self) -> AdapterResult<()> {
        self.stdin.write_all(CMD_RUN).await?;
        self.stdin.flush().await?;
        let reply = self.next_line().await?;
        let driver_ms = parse_run_reply(&reply)?;
        debug!(driver_ms, "driver reported one execution");
        Ok(())
    }

    /// Ask the driver to exit, then kill it if it lingers.
    ///
    /// Also the termination path after a timed-out trial: the EXIT command
    /// sits unread while the driver is wedged, the grace period elapses and
    /// the child is killed.
    pub async fn shutdown(mut self) {
        let _ = self.stdin.write_all(CMD_EXIT).await;
        let _ = self.stdin.flush().await;
        match timeout(SHUTDOWN_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => debug!(%status, "driver exited"),
            Ok(Err(e)) => warn!(error = %e, "could not reap driver"),
            Err(_) => {
                warn!("driver ignored EXIT, killing it");
                if let Err(e) = self.child.kill().await {
                    warn!(error = %e, "failed to kill driver");
                }
            }
        }
    }

    async fn next_line(&mut self) -> AdapterResult<String> {
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(AdapterError::Protocol(
                "driver exited before replying; rerun with -vv to capture its stderr".into(),
            )),
        }
    }
}

/// A warm driver is itself the executable for driver-hosted backends: each
/// RUN exchange is one complete execution, and teardown is the EXIT/kill
/// sequence.
#[async_trait::async_trait]
impl crate::adapter::Executable for PyDriver {
    async fn execute(&mut self) -> AdapterResult<()> {
        self.run_once().await
    }

    async fn dispose(self: Box<Self>) {
        self.shutdown().await;
    }
}

/// Run a short availability check, mapping every failure mode to
/// [`AdapterError::Unsupported`] with a hint at the cause.
pub async fn probe_command(program: &str, args: &[&str]) -> AdapterResult<()> {
    let output = timeout(
        PROBE_TIMEOUT,
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .map_err(|_| AdapterError::Unsupported(format!("{program} probe timed out")))?
    .map_err(|e| AdapterError::Unsupported(format!("{program} not runnable: {e}")))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(AdapterError::Unsupported(format!(
            "{program} probe failed ({}): {}",
            output.status,
            stderr.trim()
        )))
    }
}

fn parse_ready(line: &str) -> AdapterResult<Option<String>> {
    if let Some(rest) = line.strip_prefix(REPLY_FATAL) {
        return Err(AdapterError::Unsupported(rest.trim().to_string()));
    }
    match line.strip_prefix(REPLY_READY) {
        Some(rest) if rest.is_empty() => Ok(None),
        Some(rest) if rest.starts_with(' ') => Ok(Some(rest.trim().to_string())),
        _ => Err(AdapterError::Protocol(format!(
            "expected READY, got {line:?}"
        ))),
    }
}

fn parse_run_reply(line: &str) -> AdapterResult<f64> {
    if let Some(rest) = line.strip_prefix(REPLY_ERR) {
        return Err(AdapterError::Backend(rest.trim().to_string()));
    }
    let rest = line
        .strip_prefix(REPLY_OK)
        .ok_or_else(|| AdapterError::Protocol(format!("expected OK or ERR, got {line:?}")))?;
    rest.trim()
        .parse::<f64>()
        .map_err(|_| AdapterError::Protocol(format!("malformed driver timing in {line:?}")))
}
