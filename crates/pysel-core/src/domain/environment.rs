//! Environment kinds and their command shaping.
//!
//! Exactly one kind is selected per request, in the fixed priority
//! Pixi > Conda > Microsoft Store > Plain. Each wrapper carries the metadata
//! needed to invoke commands inside its environment; the wrappers never touch
//! the OS themselves.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::execution::ExecutionInfo;

/// A Pixi-managed environment.
///
/// Pixi environments live under `<project>/.pixi/envs/<name>` next to a
/// `pixi.toml` manifest. Commands are routed through `pixi run` so the
/// manifest's activation hooks apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixiEnvironment {
    /// Path to the `pixi` executable used to run commands.
    pub pixi_executable: PathBuf,
    /// Manifest (`pixi.toml`) the environment belongs to.
    pub manifest: PathBuf,
    /// Environment name (`default` for the unnamed environment).
    pub name: String,
    /// Environment prefix (`.pixi/envs/<name>`).
    pub prefix: PathBuf,
    /// Interpreter inside the environment.
    pub interpreter: PathBuf,
}

/// A Conda-managed environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondaEnvironment {
    /// Environment prefix (the directory holding `conda-meta`).
    pub prefix: PathBuf,
    /// Environment name, when the prefix lives under an `envs/` directory.
    pub name: Option<String>,
    /// Interpreter inside the environment.
    pub interpreter: PathBuf,
    /// `conda` executable for `conda run`, when one is available.
    pub conda_executable: Option<PathBuf>,
}

/// A Microsoft-Store-distributed interpreter.
///
/// Detection-only specialization: invocation is direct, but store installs
/// need different upgrade and alias handling than regular interpreters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEnvironment {
    /// The store-distributed interpreter.
    pub interpreter: PathBuf,
}

/// A plain interpreter with no managing tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainEnvironment {
    /// The interpreter to invoke directly.
    pub interpreter: PathBuf,
}

impl PlainEnvironment {
    /// Wrap a bare interpreter path.
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }
}

/// The classified environment for a resolved interpreter path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PythonEnvironment {
    /// Pixi-managed environment.
    Pixi(PixiEnvironment),
    /// Conda-managed environment.
    Conda(CondaEnvironment),
    /// Microsoft-Store-distributed interpreter.
    MicrosoftStore(StoreEnvironment),
    /// Plain interpreter, the universal fallback.
    Plain(PlainEnvironment),
}

impl PythonEnvironment {
    /// Short name of the environment kind, for logs and telemetry.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Pixi(_) => "pixi",
            Self::Conda(_) => "conda",
            Self::MicrosoftStore(_) => "microsoft-store",
            Self::Plain(_) => "plain",
        }
    }

    /// The interpreter path this environment was classified from.
    #[must_use]
    pub fn executable_path(&self) -> &Path {
        match self {
            Self::Pixi(env) => &env.interpreter,
            Self::Conda(env) => &env.interpreter,
            Self::MicrosoftStore(env) => &env.interpreter,
            Self::Plain(env) => &env.interpreter,
        }
    }

    /// Shape a full invocation of the interpreter with the given arguments.
    ///
    /// Managed environments route through their tool (`pixi run`,
    /// `conda run`) so activation side effects apply; everything else invokes
    /// the interpreter directly.
    #[must_use]
    pub fn invocation(&self, args: &[String]) -> ExecutionInfo {
        match self {
            Self::Pixi(env) => {
                let mut full = vec![
                    "run".to_string(),
                    "--manifest-path".to_string(),
                    env.manifest.to_string_lossy().into_owned(),
                    "--environment".to_string(),
                    env.name.clone(),
                    "python".to_string(),
                ];
                full.extend_from_slice(args);
                ExecutionInfo::new(env.pixi_executable.clone(), full)
            }
            Self::Conda(env) => match &env.conda_executable {
                Some(conda) => {
                    let mut full = vec!["run".to_string()];
                    if let Some(name) = &env.name {
                        full.push("-n".to_string());
                        full.push(name.clone());
                    } else {
                        full.push("-p".to_string());
                        full.push(env.prefix.to_string_lossy().into_owned());
                    }
                    full.push("--no-capture-output".to_string());
                    full.push("python".to_string());
                    full.extend_from_slice(args);
                    ExecutionInfo::new(conda.clone(), full)
                }
                // No conda on PATH: fall back to the env's own interpreter
                None => ExecutionInfo::new(env.interpreter.clone(), args.to_vec()),
            },
            Self::MicrosoftStore(env) => ExecutionInfo::new(env.interpreter.clone(), args.to_vec()),
            Self::Plain(env) => ExecutionInfo::new(env.interpreter.clone(), args.to_vec()),
        }
    }

    /// Shape a direct interpreter invocation, bypassing any managing tool.
    ///
    /// Tooling integrations (linters, formatters) parse interpreter output
    /// and cannot tolerate wrapper noise on stdout, so they always get the
    /// bare interpreter.
    #[must_use]
    pub fn tooling_invocation(&self, args: &[String]) -> ExecutionInfo {
        ExecutionInfo::new(self.executable_path().to_path_buf(), args.to_vec())
    }
}
