use {
    crate::{
        catalog::Catalog,
        config::Config,
        locale,
        notify::Notifier,
        platform::{self, Host},
        state::{StateDirectory, StateError},
        supervisor::Supervisor,
    },
    chrono::{DateTime, Local},
    error_reporter::Report,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

pub fn main() -> i32 {
    let config = Config::from_env();
    let host = platform::native();
    let language = locale::get_system_language();
    log::debug!("Using language {language}");
    let notifier =
        Notifier::new(host, Catalog::builtin(), language).with_icon(config.icon.clone());
    match run(&config, host, &notifier, Local::now()) {
        Ok(code) => code,
        Err(e) => {
            let report = Report::new(e);
            log::error!("Could not prepare {}: {report}", config.state_root.display());
            eprintln!("Critical error: {report}");
            EXIT_FAILURE
        }
    }
}

/// Prepares the state directory, runs the target once and escalates failures.
///
/// Only state directory problems are returned as errors; the returned code is what the
/// launcher process should exit with.
pub fn run(
    config: &Config,
    host: &dyn Host,
    notifier: &Notifier<'_>,
    now: DateTime<Local>,
) -> Result<i32, StateError> {
    let state = StateDirectory::new(config.state_root.clone());
    state.ensure_directories()?;
    log::debug!("Using state directory {}", state.root().display());
    if state.is_first_launch()? {
        notifier.show_first_launch_notice();
    }

    let log_path = state.log_file_path(now);
    log::info!(
        "Starting {}, output goes to {}",
        config.target.display(),
        log_path.display()
    );
    let mut supervisor = Supervisor::new(host);
    let outcome = supervisor.execute(&config.target, &log_path);
    log::debug!("Supervisor finished in {:?}", supervisor.state());
    if outcome.is_success() {
        return Ok(EXIT_SUCCESS);
    }

    log::error!("{} failed with {}", config.target.display(), outcome.code());
    notifier.show_error_message(&log_path);
    notifier.reveal_log_location(&log_path);
    Ok(EXIT_FAILURE)
}
