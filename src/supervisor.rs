use {
    crate::platform::Host,
    error_reporter::Report,
    std::{
        env::consts::EXE_EXTENSION,
        ffi::OsString,
        fs::{File, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
        process::ExitStatus,
    },
    thiserror::Error,
};

/// Offset added to a fatal signal number, as shells do.
const SIGNAL_EXIT_BASE: i32 = 128;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Executable not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Could not resolve {}", .0.display())]
    Resolve(PathBuf, #[source] io::Error),
    #[error("Could not open log file {}", .0.display())]
    OpenLog(PathBuf, #[source] io::Error),
    #[error("Failed to create process")]
    Spawn(#[source] io::Error),
    #[error("Failed to wait for process {0}")]
    Wait(u32, #[source] io::Error),
}

/// What the caller gets back from [`Supervisor::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    LaunchFailed,
}

impl ExitOutcome {
    pub const LAUNCH_FAILED_CODE: i32 = -1;

    pub fn code(self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => code,
            ExitOutcome::LaunchFailed => Self::LAUNCH_FAILED_CODE,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitOutcome::Exited(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    NotStarted,
    Launched { pid: u32 },
    Completed { code: i32 },
    LaunchFailed,
}

/// How the child ended, before it is folded into a single exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    Code(i32),
    Signal(i32),
}

impl Termination {
    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signal(signal);
            }
        }
        Termination::Code(1)
    }

    fn exit_code(self) -> i32 {
        match self {
            Termination::Code(code) => code,
            Termination::Signal(signal) => SIGNAL_EXIT_BASE + signal,
        }
    }

    fn describe(self) -> String {
        match self {
            Termination::Code(code) => format!("Process exited with code {code}"),
            Termination::Signal(signal) => format!("Process terminated by signal {signal}"),
        }
    }
}

/// Runs one child process at a time and records its output in a log file.
pub struct Supervisor<'a> {
    host: &'a dyn Host,
    state: SupervisorState,
}

impl<'a> Supervisor<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        Self {
            host,
            state: SupervisorState::NotStarted,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Launches `target`, waits for it, and returns how it ended.
    ///
    /// Whenever the outcome is not a success, `log_path` exists and ends with a
    /// diagnostic line (unless the log file itself could not be opened).
    pub fn execute(&mut self, target: &Path, log_path: &Path) -> ExitOutcome {
        match self.try_execute(target, log_path) {
            Ok(termination) => {
                let code = termination.exit_code();
                if code != 0 {
                    append_diagnostic(log_path, &termination.describe());
                }
                log::info!("{}", termination.describe());
                self.transition(SupervisorState::Completed { code });
                ExitOutcome::Exited(code)
            }
            Err(e) => {
                log::error!("Could not launch {}: {}", target.display(), Report::new(&e));
                if !matches!(e, LaunchError::OpenLog(..)) {
                    append_diagnostic(log_path, &format!("Error: {}", Report::new(&e)));
                }
                self.transition(SupervisorState::LaunchFailed);
                ExitOutcome::LaunchFailed
            }
        }
    }

    fn try_execute(&mut self, target: &Path, log_path: &Path) -> Result<Termination, LaunchError> {
        let program = resolve_executable(target)?;
        if !program.exists() {
            return Err(LaunchError::NotFound(program));
        }
        let log = open_log(log_path)?;
        let mut child = self
            .host
            .spawn_with_redirected_output(&program, log)
            .map_err(LaunchError::Spawn)?;
        let pid = child.id();
        log::info!("Launched {} as {pid}", program.display());
        self.transition(SupervisorState::Launched { pid });
        let status = child.wait().map_err(|e| LaunchError::Wait(pid, e))?;
        Ok(Termination::from_status(status))
    }

    fn transition(&mut self, next: SupervisorState) {
        log::debug!("Supervisor {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Makes `target` absolute, adding the platform's executable suffix first.
pub fn resolve_executable(target: &Path) -> Result<PathBuf, LaunchError> {
    let name = with_exe_extension(target, EXE_EXTENSION);
    std::path::absolute(&name).map_err(|e| LaunchError::Resolve(name, e))
}

/// Appends `.extension` unless `target` already ends in it (case-insensitively).
fn with_exe_extension(target: &Path, extension: &str) -> PathBuf {
    let present = target
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    if extension.is_empty() || present {
        return target.to_path_buf();
    }
    let mut name = OsString::from(target);
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn open_log(path: &Path) -> Result<File, LaunchError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LaunchError::OpenLog(path.to_path_buf(), e))
}

fn append_diagnostic(log_path: &Path, line: &str) {
    let res = open_log(log_path).and_then(|mut log| {
        writeln!(log, "{line}").map_err(|e| LaunchError::OpenLog(log_path.to_path_buf(), e))
    });
    if let Err(e) = res {
        log::error!("Could not write diagnostic: {}", Report::new(e));
    }
}
