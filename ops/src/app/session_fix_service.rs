//! Session Cookie Fix Service
//!
//! Switches the deployed application into development mode so its session
//! cookie is issued without the `Secure` flag, then restarts the server:
//! - service manager first
//! - kill + detached relaunch when the service manager fails
//! - readiness polling instead of a fixed sleep
//!
//! Every failure after the service manager is reported, never swallowed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::time::Instant;

use crate::config::Config;
use crate::domain::entities::{
    assigned_values, enable_development, LaunchSpec, PatchOutcome, Readiness, RestartPath,
    RestartReport, DEVELOPMENT_KEY, DEVELOPMENT_VALUE,
};
use crate::domain::ports::{EnvStore, ProcessControl, ReadinessProbe, ServiceManager};
use crate::error::{AppError, EnvFileError};

/// Time between readiness probes
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);
/// Upper bound for a single probe request
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// How the server is restarted and checked
#[derive(Debug, Clone)]
pub struct RestartSettings {
    pub service: String,
    pub process_pattern: String,
    pub launch: LaunchSpec,
    /// Probed for readiness
    pub url: String,
    /// Shown to the operator
    pub display_url: String,
    /// Zero disables readiness polling
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
}

impl RestartSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            service: config.service.clone(),
            process_pattern: config.process_pattern.clone(),
            launch: LaunchSpec::uvicorn(
                &config.host,
                config.port,
                config.app_dir.clone(),
                config.log_file.clone(),
            ),
            url: config.server_url(),
            display_url: config.display_url(),
            ready_timeout: config.ready_timeout,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// What the operator asked for
#[derive(Debug, Clone, Copy, Default)]
pub struct FixOptions {
    /// Append `DEVELOPMENT=true` when the key is absent
    pub insert_missing: bool,
    /// Compute the outcome only
    pub dry_run: bool,
    /// Skip the restart
    pub no_restart: bool,
}

/// Result of a full session cookie fix
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub env_file: PathBuf,
    pub outcome: PatchOutcome,
    pub dry_run: bool,
    /// `None` when the restart was skipped
    pub restart: Option<RestartReport>,
}

/// Service for the session cookie fix
pub struct SessionFixService<ES, SM, PC, RP>
where
    ES: EnvStore,
    SM: ServiceManager,
    PC: ProcessControl,
    RP: ReadinessProbe,
{
    store: Arc<ES>,
    services: Arc<SM>,
    processes: Arc<PC>,
    probe: Arc<RP>,
    settings: RestartSettings,
}

impl<ES, SM, PC, RP> SessionFixService<ES, SM, PC, RP>
where
    ES: EnvStore,
    SM: ServiceManager,
    PC: ProcessControl,
    RP: ReadinessProbe,
{
    pub fn new(
        store: Arc<ES>,
        services: Arc<SM>,
        processes: Arc<PC>,
        probe: Arc<RP>,
        settings: RestartSettings,
    ) -> Self {
        Self {
            store,
            services,
            processes,
            probe,
            settings,
        }
    }

    /// Patch the env file, then restart unless asked not to
    pub async fn run(&self, env_file: &Path, options: FixOptions) -> Result<FixReport, AppError> {
        let outcome = self
            .patch(env_file, options.insert_missing, options.dry_run)
            .await?;

        if outcome == PatchOutcome::Missing {
            tracing::warn!(
                env_file = %env_file.display(),
                "No {} line found; file left unchanged",
                DEVELOPMENT_KEY
            );
        }

        let restart = if options.dry_run || options.no_restart {
            None
        } else {
            Some(self.restart().await?)
        };

        Ok(FixReport {
            env_file: env_file.to_path_buf(),
            outcome,
            dry_run: options.dry_run,
            restart,
        })
    }

    /// Set `DEVELOPMENT=true` in `env_file`
    pub async fn patch(
        &self,
        env_file: &Path,
        insert_missing: bool,
        dry_run: bool,
    ) -> Result<PatchOutcome, AppError> {
        let content = self.store.read(env_file).await?;
        let patch = enable_development(&content, insert_missing)?;

        if dry_run || !patch.outcome.changed() {
            tracing::info!(
                env_file = %env_file.display(),
                outcome = %patch.outcome,
                dry_run,
                "Env file not written"
            );
            return Ok(patch.outcome);
        }

        self.store.write(env_file, &patch.content).await?;
        self.verify(env_file).await?;

        tracing::info!(
            env_file = %env_file.display(),
            outcome = %patch.outcome,
            "Set {}={}",
            DEVELOPMENT_KEY,
            DEVELOPMENT_VALUE
        );
        Ok(patch.outcome)
    }

    /// Re-read the file and check every `DEVELOPMENT=` line holds `true`
    async fn verify(&self, env_file: &Path) -> Result<(), EnvFileError> {
        let written = self.store.read(env_file).await?;
        let values = assigned_values(&written, DEVELOPMENT_KEY)?;

        if !values.is_empty() && values.iter().all(|v| v == DEVELOPMENT_VALUE) {
            return Ok(());
        }
        Err(EnvFileError::Verification {
            key: DEVELOPMENT_KEY.to_string(),
            expected: DEVELOPMENT_VALUE.to_string(),
            actual: values.into_iter().find(|v| v != DEVELOPMENT_VALUE),
        })
    }

    /// Restart the server and wait until it answers
    ///
    /// One deadline of `ready_timeout` covers waiting for a killed server to
    /// go away and waiting for its replacement to answer.
    pub async fn restart(&self) -> Result<RestartReport, AppError> {
        let settings = &self.settings;
        let started = Instant::now();
        let deadline = started + settings.ready_timeout;

        let path = match self.services.restart(&settings.service).await {
            Ok(()) => RestartPath::ServiceManager {
                service: settings.service.clone(),
            },
            Err(service_error) => {
                tracing::warn!(
                    service = %settings.service,
                    error = %service_error,
                    "Service manager restart failed, falling back to manual relaunch"
                );
                self.relaunch(service_error.to_string(), deadline).await?
            }
        };

        let readiness = self.wait_until_ready(started, deadline).await?;

        Ok(RestartReport {
            path,
            readiness,
            url: settings.display_url.clone(),
            finished_at: Utc::now(),
        })
    }

    async fn relaunch(
        &self,
        service_error: String,
        deadline: Instant,
    ) -> Result<RestartPath, AppError> {
        let settings = &self.settings;
        let fallback_failed = |e: &dyn std::fmt::Display| AppError::RestartFailed {
            service_error: service_error.clone(),
            fallback_error: e.to_string(),
        };

        let killed = self
            .processes
            .kill_matching(&settings.process_pattern)
            .await
            .map_err(|e| fallback_failed(&e))?;

        if killed && !self.wait_until_down(deadline).await {
            tracing::warn!(url = %settings.url, "Old server still answering after kill");
            return Err(fallback_failed(&format!(
                "server at {} still answering after killing '{}'",
                settings.url, settings.process_pattern
            )));
        }

        let pid = self
            .processes
            .spawn_detached(&settings.launch)
            .await
            .map_err(|e| fallback_failed(&e))?;

        Ok(RestartPath::Fallback {
            killed,
            pid,
            service_error,
        })
    }

    /// Wait for killed processes to release the port
    ///
    /// Returns `false` if the old server still answers at `deadline`; a
    /// relaunch would then lose the port and the probe would hit the old
    /// process.
    async fn wait_until_down(&self, deadline: Instant) -> bool {
        let settings = &self.settings;
        if settings.ready_timeout.is_zero() {
            return true;
        }

        loop {
            if !self.probe.is_ready(&settings.url, PROBE_TIMEOUT).await {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(settings.poll_interval).await;
        }
    }

    async fn wait_until_ready(
        &self,
        started: Instant,
        deadline: Instant,
    ) -> Result<Readiness, AppError> {
        let settings = &self.settings;
        if settings.ready_timeout.is_zero() {
            return Ok(Readiness::Unchecked);
        }

        loop {
            if self.probe.is_ready(&settings.url, PROBE_TIMEOUT).await {
                let waited = started.elapsed();
                tracing::info!(url = %settings.url, ?waited, "Server is ready");
                return Ok(Readiness::ready_after(waited));
            }

            if Instant::now() >= deadline {
                return Err(AppError::NotReady {
                    url: settings.url.clone(),
                    waited: started.elapsed(),
                });
            }
            tokio::time::sleep(settings.poll_interval).await;
        }
    }
}
