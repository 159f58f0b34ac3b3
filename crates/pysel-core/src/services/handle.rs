//! The bound execution handle.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{
    ExecutionInfo, InterpreterInfo, OutputStream, ProcessOutput, PythonEnvironment,
};
use crate::ports::{ExecOptions, FileSystemPort, ProcessServicePort, ResolveError};

/// One-line probe the interpreter runs to report its own metadata.
const INTERPRETER_INFO_SCRIPT: &str = "import json, struct, sys; print(json.dumps({\"version\": \"{0}.{1}.{2}\".format(*sys.version_info[:3]), \"sys_prefix\": sys.prefix, \"executable\": sys.executable, \"is64_bit\": struct.calcsize(\"P\") == 8}))";

/// Probe that exits 0 when a module is importable.
fn module_check_script(module: &str) -> String {
    format!(
        "import importlib.util, sys; sys.exit(0 if importlib.util.find_spec(\"{module}\") else 1)"
    )
}

/// Probe that prints an installed module's distribution version.
fn module_version_script(module: &str) -> String {
    format!("import importlib.metadata; print(importlib.metadata.version(\"{module}\"))")
}

/// The bound, ready-to-use result of resolution.
///
/// Wraps a classified environment and a process service into a uniform
/// facade, so callers never branch on the environment kind. Every operation
/// delegates; the handle adds no behavior of its own.
pub struct ExecutionHandle {
    environment: PythonEnvironment,
    process: Arc<dyn ProcessServicePort>,
    fs: Arc<dyn FileSystemPort>,
}

impl ExecutionHandle {
    /// Bind an environment to a process service.
    pub fn new(
        environment: PythonEnvironment,
        process: Arc<dyn ProcessServicePort>,
        fs: Arc<dyn FileSystemPort>,
    ) -> Self {
        Self {
            environment,
            process,
            fs,
        }
    }

    /// The classified environment behind this handle.
    #[must_use]
    pub const fn environment(&self) -> &PythonEnvironment {
        &self.environment
    }

    /// Interpreter metadata, reported by the interpreter itself.
    pub async fn interpreter_info(&self) -> Result<InterpreterInfo, ResolveError> {
        let output = self
            .exec(&["-c".to_string(), INTERPRETER_INFO_SCRIPT.to_string()])
            .await?;
        // Managed wrappers may emit banner noise ahead of the payload, so
        // parse the last non-empty line
        let payload = output
            .stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default();
        serde_json::from_str(payload)
            .map_err(|e| ResolveError::MalformedProbeOutput(format!("{e}: {payload:?}")))
    }

    /// The environment's executable path.
    ///
    /// Returns the classified path when it exists on disk; otherwise asks
    /// the interpreter for `sys.executable` (the classified value may be a
    /// bare command name found via `PATH`).
    pub async fn executable_path(&self) -> Result<PathBuf, ResolveError> {
        let configured = self.environment.executable_path();
        if self.fs.is_file(configured).await {
            return Ok(configured.to_path_buf());
        }
        let output = self
            .exec(&[
                "-c".to_string(),
                "import sys; print(sys.executable)".to_string(),
            ])
            .await?;
        Ok(PathBuf::from(output.stdout.trim()))
    }

    /// Whether a module is importable inside the environment.
    pub async fn is_module_installed(&self, module: &str) -> Result<bool, ResolveError> {
        let output = self
            .exec(&["-c".to_string(), module_check_script(module)])
            .await?;
        Ok(output.success())
    }

    /// Installed distribution version of a module, when one is reported.
    pub async fn module_version(&self, module: &str) -> Result<Option<String>, ResolveError> {
        let output = self
            .exec(&["-c".to_string(), module_version_script(module)])
            .await?;
        if !output.success() {
            return Ok(None);
        }
        let version = output.stdout.trim();
        Ok((!version.is_empty()).then(|| version.to_string()))
    }

    /// The shaped invocation for the given interpreter arguments.
    #[must_use]
    pub fn execution_info(&self, args: &[String]) -> ExecutionInfo {
        self.environment.invocation(args)
    }

    /// Run the interpreter with the given arguments and collect output.
    pub async fn exec(&self, args: &[String]) -> Result<ProcessOutput, ResolveError> {
        let info = self.environment.invocation(args);
        self.run(info).await
    }

    /// Run a module (`python -m`) and collect output.
    pub async fn exec_module(
        &self,
        module: &str,
        args: &[String],
    ) -> Result<ProcessOutput, ResolveError> {
        let info = self.environment.invocation(&module_args(module, args));
        self.run(info).await
    }

    /// Run a module for tooling consumers, bypassing the environment's
    /// command wrapper so stdout stays parseable.
    pub async fn exec_module_for_tooling(
        &self,
        module: &str,
        args: &[String],
    ) -> Result<ProcessOutput, ResolveError> {
        let info = self
            .environment
            .tooling_invocation(&module_args(module, args));
        self.run(info).await
    }

    /// Run the interpreter and observe its output as a line stream.
    pub async fn exec_observable(&self, args: &[String]) -> Result<OutputStream, ResolveError> {
        let info = self.environment.invocation(args);
        self.observe(info).await
    }

    /// Run a module and observe its output as a line stream.
    pub async fn exec_module_observable(
        &self,
        module: &str,
        args: &[String],
    ) -> Result<OutputStream, ResolveError> {
        let info = self.environment.invocation(&module_args(module, args));
        self.observe(info).await
    }

    async fn run(&self, info: ExecutionInfo) -> Result<ProcessOutput, ResolveError> {
        let options = ExecOptions {
            env: info.env.clone(),
            ..ExecOptions::default()
        };
        self.process
            .exec(&info.program, &info.args, options)
            .await
            .map_err(ResolveError::from)
    }

    async fn observe(&self, info: ExecutionInfo) -> Result<OutputStream, ResolveError> {
        let options = ExecOptions {
            env: info.env.clone(),
            ..ExecOptions::default()
        };
        self.process
            .exec_observable(&info.program, &info.args, options)
            .await
            .map_err(ResolveError::from)
    }
}

fn module_args(module: &str, args: &[String]) -> Vec<String> {
    let mut full = Vec::with_capacity(args.len() + 2);
    full.push("-m".to_string());
    full.push(module.to_string());
    full.extend_from_slice(args);
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    use crate::domain::PlainEnvironment;
    use crate::ports::{Disposable, ProcessError};

    /// Process service that records invocations and replays scripted output.
    struct ReplayProcess {
        calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
        output: ProcessOutput,
    }

    impl ReplayProcess {
        fn new(output: ProcessOutput) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                output,
            }
        }
    }

    #[async_trait]
    impl Disposable for ReplayProcess {
        async fn dispose(&self) {}
    }

    #[async_trait]
    impl ProcessServicePort for ReplayProcess {
        async fn exec(
            &self,
            program: &Path,
            args: &[String],
            _options: ExecOptions,
        ) -> Result<ProcessOutput, ProcessError> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            Ok(self.output.clone())
        }

        async fn exec_observable(
            &self,
            _program: &Path,
            _args: &[String],
            _options: ExecOptions,
        ) -> Result<OutputStream, ProcessError> {
            unimplemented!("not used in these tests")
        }
    }

    struct StaticFs {
        file_exists: bool,
    }

    #[async_trait]
    impl FileSystemPort for StaticFs {
        async fn exists(&self, _path: &Path) -> bool {
            self.file_exists
        }

        async fn is_file(&self, _path: &Path) -> bool {
            self.file_exists
        }
    }

    fn handle(output: ProcessOutput, file_exists: bool) -> (ExecutionHandle, Arc<ReplayProcess>) {
        let process = Arc::new(ReplayProcess::new(output));
        let handle = ExecutionHandle::new(
            PythonEnvironment::Plain(PlainEnvironment::new("/usr/bin/python3")),
            process.clone(),
            Arc::new(StaticFs { file_exists }),
        );
        (handle, process)
    }

    #[tokio::test]
    async fn test_executable_path_round_trips_without_transformation() {
        let (handle, process) = handle(ProcessOutput::default(), true);
        let path = handle.executable_path().await.unwrap();
        assert_eq!(path, handle.environment().executable_path());
        // Present on disk: no probe process was run
        assert!(process.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_executable_path_probes_when_missing() {
        let output = ProcessOutput {
            stdout: "/usr/bin/python3.12\n".to_string(),
            exit_code: Some(0),
            ..Default::default()
        };
        let (handle, _) = handle(output, false);
        let path = handle.executable_path().await.unwrap();
        assert_eq!(path, PathBuf::from("/usr/bin/python3.12"));
    }

    #[tokio::test]
    async fn test_interpreter_info_parses_last_line() {
        let output = ProcessOutput {
            stdout: "activation banner\n{\"version\": \"3.11.8\", \"sys_prefix\": \"/usr\", \"executable\": \"/usr/bin/python3\", \"is64_bit\": true}\n".to_string(),
            exit_code: Some(0),
            ..Default::default()
        };
        let (handle, _) = handle(output, true);
        let info = handle.interpreter_info().await.unwrap();
        assert_eq!(info.version, "3.11.8");
        assert!(info.is64_bit);
    }

    #[tokio::test]
    async fn test_interpreter_info_malformed_output() {
        let output = ProcessOutput {
            stdout: "not json".to_string(),
            exit_code: Some(0),
            ..Default::default()
        };
        let (handle, _) = handle(output, true);
        let result = handle.interpreter_info().await;
        assert!(matches!(result, Err(ResolveError::MalformedProbeOutput(_))));
    }

    #[tokio::test]
    async fn test_module_checks() {
        let (handle, process) = handle(
            ProcessOutput {
                stdout: "2.31.0\n".to_string(),
                exit_code: Some(0),
                ..Default::default()
            },
            true,
        );

        assert!(handle.is_module_installed("requests").await.unwrap());
        assert_eq!(
            handle.module_version("requests").await.unwrap(),
            Some("2.31.0".to_string())
        );

        let calls = process.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].1[1].contains("requests"));
    }

    #[tokio::test]
    async fn test_module_version_missing_module() {
        let (handle, _) = handle(
            ProcessOutput {
                stderr: "PackageNotFoundError".to_string(),
                exit_code: Some(1),
                ..Default::default()
            },
            true,
        );
        assert_eq!(handle.module_version("nosuchmod").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_exec_module_shapes_dash_m() {
        let (handle, process) = handle(
            ProcessOutput {
                exit_code: Some(0),
                ..Default::default()
            },
            true,
        );
        handle
            .exec_module("pytest", &["-q".to_string()])
            .await
            .unwrap();

        let calls = process.calls.lock().unwrap();
        assert_eq!(calls[0].0, PathBuf::from("/usr/bin/python3"));
        assert_eq!(calls[0].1, vec!["-m", "pytest", "-q"]);
    }
}
