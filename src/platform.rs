//! Host capabilities that differ per operating system.
//!
//! The supervisor and the notification dispatcher only talk to [`Host`]; [`native`]
//! returns the implementation for the platform the launcher was built for.

use {
    std::{
        fs::File,
        io,
        path::Path,
        process::{Child, Command, ExitStatus, Stdio},
    },
    thiserror::Error,
};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[derive(Debug, Error)]
pub enum HostError {
    #[cfg(target_os = "linux")]
    #[error("D-Bus call failed")]
    DBus(#[source] zbus::Error),
    #[cfg(target_os = "linux")]
    #[error("Could not initialize GTK")]
    Gtk(#[source] gtk4::glib::BoolError),
    #[cfg(target_os = "windows")]
    #[error("Could not show toast notification")]
    Toast(#[source] notify_rust::error::Error),
    #[error("Could not run {0}")]
    Spawn(&'static str, #[source] io::Error),
    #[error("{0} exited with {1}")]
    CommandFailed(&'static str, ExitStatus),
    #[cfg(target_os = "linux")]
    #[error("{0} cannot be expressed as a file URI")]
    NotAFileUri(String),
    #[error("Not supported on this platform")]
    Unsupported,
}

pub trait Host {
    /// Starts `program` without arguments, with stdout and stderr both appended to `log`.
    fn spawn_with_redirected_output(&self, program: &Path, log: File) -> io::Result<Child>;

    fn show_toast(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), HostError>;

    /// Does not return before the user has dismissed the dialog.
    fn show_blocking_error_dialog(&self, title: &str, body: &str) -> Result<(), HostError>;

    fn reveal_in_file_browser(&self, path: &Path) -> Result<(), HostError>;
}

pub fn native() -> &'static dyn Host {
    #[cfg(target_os = "linux")]
    return &linux::Linux;
    #[cfg(target_os = "macos")]
    return &macos::MacOs;
    #[cfg(target_os = "windows")]
    return &windows::Windows;
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return &Headless;
}

/// Spawns with both output streams sharing one append-mode handle so the transcript
/// stays in the order the child wrote it. Stdin is inherited from the launcher.
pub(crate) fn spawn_redirected(
    program: &Path,
    log: File,
    configure: impl FnOnce(&mut Command),
) -> io::Result<Child> {
    let stderr = log.try_clone()?;
    let mut command = Command::new(program);
    command.stdout(Stdio::from(log)).stderr(Stdio::from(stderr));
    configure(&mut command);
    command.spawn()
}

/// Runs a helper program to completion, treating a non-zero exit as failure.
#[cfg_attr(
    not(any(target_os = "linux", target_os = "macos", target_os = "windows")),
    allow(dead_code)
)]
pub(crate) fn run_helper(name: &'static str, command: &mut Command) -> Result<(), HostError> {
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .map_err(|e| HostError::Spawn(name, e))?;
    if status.success() {
        Ok(())
    } else {
        Err(HostError::CommandFailed(name, status))
    }
}

/// Fallback for platforms without any notification mechanism we know of.
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
struct Headless;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
impl Host for Headless {
    fn spawn_with_redirected_output(&self, program: &Path, log: File) -> io::Result<Child> {
        spawn_redirected(program, log, |_| {})
    }

    fn show_toast(&self, _: &str, _: &str, _: Option<&Path>) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }

    fn show_blocking_error_dialog(&self, title: &str, body: &str) -> Result<(), HostError> {
        eprintln!("{title}: {body}");
        Ok(())
    }

    fn reveal_in_file_browser(&self, _: &Path) -> Result<(), HostError> {
        Err(HostError::Unsupported)
    }
}
