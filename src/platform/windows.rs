use {
    super::{run_helper, spawn_redirected, Host, HostError},
    crate::config::APP_NAME,
    notify_rust::{Notification, Timeout},
    rfd::{MessageButtons, MessageDialog, MessageLevel},
    std::{
        ffi::OsString,
        fs::File,
        io,
        os::windows::process::CommandExt,
        path::Path,
        process::{Child, Command},
    },
};

const CREATE_NO_WINDOW: u32 = 0x0800_0000;
const TOAST_TIMEOUT_MS: u32 = 3000;

pub struct Windows;

impl Host for Windows {
    fn spawn_with_redirected_output(&self, program: &Path, log: File) -> io::Result<Child> {
        spawn_redirected(program, log, |command| {
            command.creation_flags(CREATE_NO_WINDOW);
        })
    }

    fn show_toast(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), HostError> {
        toast(title, body, icon).show().map_err(HostError::Toast)
    }

    fn show_blocking_error_dialog(&self, title: &str, body: &str) -> Result<(), HostError> {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(body)
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }

    fn reveal_in_file_browser(&self, path: &Path) -> Result<(), HostError> {
        let mut select = OsString::from("/select,");
        select.push(path);
        // explorer.exe reports 1 even when it opened the window.
        match run_helper("explorer", Command::new("explorer").arg(select)) {
            Err(HostError::CommandFailed(..)) | Ok(()) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn toast(title: &str, body: &str, icon: Option<&Path>) -> Notification {
    let mut notification = Notification::new();
    notification
        .appname(APP_NAME)
        .summary(title)
        .body(body)
        .timeout(Timeout::Milliseconds(TOAST_TIMEOUT_MS));
    if let Some(icon) = icon {
        notification.image_path(&icon.to_string_lossy());
    }
    notification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_carries_app_name_and_text() {
        let n = toast("Title", "Body", Some(Path::new(r"C:\amcl\logo.png")));
        assert_eq!(n.appname, APP_NAME);
        assert_eq!(n.summary, "Title");
        assert_eq!(n.body, "Body");
        assert_eq!(n.timeout, Timeout::Milliseconds(TOAST_TIMEOUT_MS));
    }
}
