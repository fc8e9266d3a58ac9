//! Command handlers
//!
//! Wire configuration, adapters and services together for each subcommand.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tailsentry_ops_core::adapters::{
    FsEnvStore, HttpReadinessProbe, PkillProcessControl, PythonInterpreterProbe,
    SystemctlServiceManager,
};
use tailsentry_ops_core::app::{ActivatorService, FixOptions, RestartSettings, SessionFixService};
use tailsentry_ops_core::report::{
    render_env_exports, render_fix_report, render_venv_missing, render_venv_status,
};
use tailsentry_ops_core::{AppError, Config};

use crate::args::{ActivateArgs, FixSessionArgs};

/// Check the virtual environment; print, export or enter it
pub async fn activate(config: Config, args: ActivateArgs) -> Result<ExitCode> {
    let venv_dir = args.venv.unwrap_or(config.venv_dir);
    let service = ActivatorService::new(Arc::new(PythonInterpreterProbe::new()));

    let status = match service.inspect(&venv_dir).await {
        Ok(status) => status,
        Err(AppError::VenvMissing { path }) => {
            eprint!("{}", render_venv_missing(&path));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).context("Failed to serialize status")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    if args.print_env {
        let vars = service.activation_env(&status)?;
        print!("{}", render_env_exports(&vars, args.format.into()));
        return Ok(ExitCode::SUCCESS);
    }

    print!("{}", render_venv_status(&status));

    if args.shell {
        println!("\nStarting a shell with the environment active; type 'exit' to leave.");
        let exit = service.spawn_shell(&status).await?;
        return Ok(exit
            .code()
            .and_then(|c| u8::try_from(c).ok())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::FAILURE));
    }

    Ok(ExitCode::SUCCESS)
}

/// Set DEVELOPMENT=true and restart the server
pub async fn fix_session(config: Config, args: FixSessionArgs) -> Result<ExitCode> {
    let config = apply_overrides(config, &args);
    let settings = RestartSettings::from_config(&config);

    tracing::debug!(?config, "Resolved configuration");

    let service = SessionFixService::new(
        Arc::new(FsEnvStore::new()),
        Arc::new(SystemctlServiceManager::new()),
        Arc::new(PkillProcessControl::new()),
        Arc::new(HttpReadinessProbe::new()?),
        settings,
    );

    let options = FixOptions {
        insert_missing: args.insert_missing,
        dry_run: args.dry_run,
        no_restart: args.no_restart,
    };

    if !args.json && !options.dry_run && !options.no_restart {
        println!("Fixing session cookie settings in {}...", config.env_file.display());
    }

    let report = service.run(&config.env_file, options).await?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", render_fix_report(&report));
    }

    Ok(ExitCode::SUCCESS)
}

fn apply_overrides(mut config: Config, args: &FixSessionArgs) -> Config {
    if let Some(env_file) = &args.env_file {
        config.env_file = env_file.clone();
        // A relocated env file moves the default app dir and log with it
        if args.app_dir.is_none() {
            if let Some(parent) = env_file.parent().filter(|p| !p.as_os_str().is_empty()) {
                config.app_dir = parent.to_path_buf();
                config.log_file = config.app_dir.join("tailsentry.log");
            }
        }
    }
    if let Some(app_dir) = &args.app_dir {
        config.app_dir = app_dir.clone();
        config.log_file = app_dir.join("tailsentry.log");
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = log_file.clone();
    }
    if let Some(service) = &args.service {
        config.service = service.clone();
    }
    if let Some(pattern) = &args.process_pattern {
        config.process_pattern = pattern.clone();
    }
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(secs) = args.ready_timeout {
        config.ready_timeout = Duration::from_secs(secs);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> FixSessionArgs {
        FixSessionArgs {
            env_file: None,
            service: None,
            process_pattern: None,
            app_dir: None,
            log_file: None,
            host: None,
            port: None,
            ready_timeout: None,
            insert_missing: false,
            dry_run: false,
            no_restart: false,
            json: false,
        }
    }

    #[test]
    fn no_overrides_keeps_config() {
        let config = apply_overrides(Config::default(), &args());
        assert_eq!(config.env_file, PathBuf::from("/opt/tailsentry/.env"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn env_file_moves_app_dir_and_log() {
        let mut a = args();
        a.env_file = Some(PathBuf::from("/srv/sentry/.env"));
        let config = apply_overrides(Config::default(), &a);
        assert_eq!(config.app_dir, PathBuf::from("/srv/sentry"));
        assert_eq!(config.log_file, PathBuf::from("/srv/sentry/tailsentry.log"));
    }

    #[test]
    fn explicit_flags_win() {
        let mut a = args();
        a.env_file = Some(PathBuf::from("/srv/sentry/.env"));
        a.app_dir = Some(PathBuf::from("/apps/sentry"));
        a.log_file = Some(PathBuf::from("/var/log/sentry.log"));
        a.port = Some(9000);
        a.ready_timeout = Some(0);
        let config = apply_overrides(Config::default(), &a);
        assert_eq!(config.app_dir, PathBuf::from("/apps/sentry"));
        assert_eq!(config.log_file, PathBuf::from("/var/log/sentry.log"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.ready_timeout, Duration::ZERO);
    }
}
