//! Tokio-backed process service and factory.
//!
//! This module implements the process ports with `tokio::process`. Children
//! are spawned with `kill_on_drop` so dropping an observable stream (or the
//! service itself) releases the subprocess plumbing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

use pysel_core::domain::{OutputLine, OutputStream, ProcessOutput, Resource};
use pysel_core::ports::{
    Disposable, ExecOptions, ProcessError, ProcessServiceFactoryPort, ProcessServicePort,
};

/// Process service over tokio child processes.
///
/// A service optionally carries a base environment (captured activation
/// variables); when present it replaces the host environment entirely, the
/// way an activated shell would. Per-call [`ExecOptions::env`] entries layer
/// on top.
pub struct TokioProcessService {
    base_env: Option<HashMap<String, String>>,
    disposed: AtomicBool,
}

impl TokioProcessService {
    /// Create a service using the host's own environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_env: None,
            disposed: AtomicBool::new(false),
        }
    }

    /// Create a service whose base environment is the given variable map.
    #[must_use]
    pub fn with_env(vars: HashMap<String, String>) -> Self {
        Self {
            base_env: Some(vars),
            disposed: AtomicBool::new(false),
        }
    }

    fn command(&self, program: &Path, args: &[String], options: &ExecOptions) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }
        if let Some(base) = &self.base_env {
            cmd.env_clear();
            cmd.envs(base);
        }
        if let Some(extra) = &options.env {
            cmd.envs(extra);
        }
        cmd
    }

    fn ensure_live(&self) -> Result<(), ProcessError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(ProcessError::Disposed);
        }
        Ok(())
    }
}

impl Default for TokioProcessService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Disposable for TokioProcessService {
    async fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            debug!("process service disposed");
        }
    }
}

#[async_trait]
impl ProcessServicePort for TokioProcessService {
    async fn exec(
        &self,
        program: &Path,
        args: &[String],
        options: ExecOptions,
    ) -> Result<ProcessOutput, ProcessError> {
        self.ensure_live()?;
        debug!(program = %program.display(), ?args, "executing");

        let output = self
            .command(program, args, &options)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessError::SpawnFailed {
                program: program.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }

    async fn exec_observable(
        &self,
        program: &Path,
        args: &[String],
        options: ExecOptions,
    ) -> Result<OutputStream, ProcessError> {
        self.ensure_live()?;
        debug!(program = %program.display(), ?args, "executing (observable)");

        let mut child = self
            .command(program, args, &options)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed {
                program: program.display().to_string(),
                reason: e.to_string(),
            })?;

        let (tx, mut rx) = mpsc::unbounded_channel();

        if let Some(stdout) = child.stdout.take() {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(text)) = lines.next_line().await {
                    if tx.send(OutputLine::stdout(text)).is_err() {
                        break;
                    }
                }
            });
        }

        if let Some(stderr) = child.stderr.take() {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(text)) = lines.next_line().await {
                    if tx.send(OutputLine::stderr(text)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let stream = async_stream::stream! {
            // Owning the child here keeps it alive exactly as long as the
            // stream; kill_on_drop reaps it if the consumer walks away early
            let _child = child;
            while let Some(line) = rx.recv().await {
                yield line;
            }
        };
        Ok(Box::pin(stream))
    }
}

/// Factory producing [`TokioProcessService`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessFactory;

impl TokioProcessFactory {
    /// Create a new factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessServiceFactoryPort for TokioProcessFactory {
    async fn create(
        &self,
        _resource: Option<&Resource>,
    ) -> Result<Arc<dyn ProcessServicePort>, ProcessError> {
        Ok(Arc::new(TokioProcessService::new()))
    }

    async fn create_with_env(
        &self,
        _resource: Option<&Resource>,
        vars: HashMap<String, String>,
    ) -> Result<Arc<dyn ProcessServicePort>, ProcessError> {
        Ok(Arc::new(TokioProcessService::with_env(vars)))
    }
}
