use std::sync::Mutex;

/// Held by tests that change process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

#[cfg(unix)]
pub use unix::*;

#[cfg(unix)]
mod unix {
    use std::{
        fs,
        os::unix::fs::PermissionsExt,
        path::{Path, PathBuf},
        sync::Mutex,
    };

    /// Held while writing or executing scripts. A fork racing with an open write handle
    /// makes the exec fail with `ETXTBSY`.
    pub static SPAWN_LOCK: Mutex<()> = Mutex::new(());

    pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

pub mod fake {
    use {
        crate::platform::{self, Host, HostError},
        std::{
            cell::RefCell,
            fs::File,
            io,
            path::{Path, PathBuf},
            process::Child,
        },
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Spawn(PathBuf),
        Toast {
            title: String,
            body: String,
            icon: Option<PathBuf>,
        },
        ErrorDialog {
            title: String,
            body: String,
        },
        Reveal(PathBuf),
    }

    /// Records every user-facing call and spawns for real.
    #[derive(Default)]
    pub struct FakeHost {
        calls: RefCell<Vec<Call>>,
        failing: bool,
    }

    impl FakeHost {
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) -> Result<(), HostError> {
            self.calls.borrow_mut().push(call);
            match self.failing {
                true => Err(HostError::Unsupported),
                false => Ok(()),
            }
        }
    }

    impl Host for FakeHost {
        fn spawn_with_redirected_output(&self, program: &Path, log: File) -> io::Result<Child> {
            self.calls
                .borrow_mut()
                .push(Call::Spawn(program.to_path_buf()));
            platform::native().spawn_with_redirected_output(program, log)
        }

        fn show_toast(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), HostError> {
            self.record(Call::Toast {
                title: title.to_string(),
                body: body.to_string(),
                icon: icon.map(Path::to_path_buf),
            })
        }

        fn show_blocking_error_dialog(&self, title: &str, body: &str) -> Result<(), HostError> {
            self.record(Call::ErrorDialog {
                title: title.to_string(),
                body: body.to_string(),
            })
        }

        fn reveal_in_file_browser(&self, path: &Path) -> Result<(), HostError> {
            self.record(Call::Reveal(path.to_path_buf()))
        }
    }
}
