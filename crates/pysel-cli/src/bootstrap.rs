//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together for
//! the CLI adapter. All concrete implementations are instantiated here:
//! - Settings store (JSON file under the user config dir)
//! - Process factory, filesystem, and locators (via pysel-runtime)
//! - The environment resolver (via pysel-core)
//!
//! Command handlers receive the fully-composed context and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use pysel_core::ports::{
    Collaborators, DisposalRegistry, NoopActivation, NoopLaunchContext, NoopTelemetry,
};
use pysel_core::services::EnvironmentResolver;
use pysel_runtime::{
    DefaultCondaLocator, DefaultPixiLocator, DefaultStoreLocator, JsonFileConfiguration,
    PathScanAutoSelector, TokioFileSystem, TokioProcessFactory,
};

/// Fully composed application context for CLI commands.
pub struct CliContext {
    resolver: EnvironmentResolver,
    disposal: Arc<DisposalRegistry>,
}

impl CliContext {
    /// Wire up the default adapter set.
    ///
    /// Settings live in the user config directory unless `settings_file`
    /// overrides the location.
    pub async fn init(settings_file: Option<PathBuf>) -> Result<Self> {
        let file = match settings_file.or_else(JsonFileConfiguration::default_file) {
            Some(file) => file,
            None => anyhow::bail!("no config directory available for settings storage"),
        };
        let config = Arc::new(
            JsonFileConfiguration::load(&file)
                .await
                .with_context(|| format!("loading settings from {}", file.display()))?,
        );

        let disposal = Arc::new(DisposalRegistry::new());
        let collaborators = Collaborators {
            interpreter_paths: config.clone(),
            auto_selection: Arc::new(PathScanAutoSelector::new(config.clone())),
            config,
            launch_context: Arc::new(NoopLaunchContext::new()),
            process_factory: Arc::new(TokioProcessFactory::new()),
            conda_locator: Arc::new(DefaultCondaLocator::new()),
            pixi_locator: Arc::new(DefaultPixiLocator::new()),
            store_locator: Arc::new(DefaultStoreLocator::new()),
            activation: Arc::new(NoopActivation::new()),
            fs: Arc::new(TokioFileSystem::new()),
            telemetry: Arc::new(NoopTelemetry::new()),
            disposal: disposal.clone(),
        };

        Ok(Self {
            resolver: EnvironmentResolver::new(collaborators),
            disposal,
        })
    }

    /// The environment resolver.
    #[must_use]
    pub const fn resolver(&self) -> &EnvironmentResolver {
        &self.resolver
    }

    /// Release scoped resources created during this invocation.
    pub async fn shutdown(&self) {
        self.disposal.dispose_all().await;
    }
}
