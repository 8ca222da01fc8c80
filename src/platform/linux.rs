use {
    super::{run_helper, spawn_redirected, Host, HostError},
    crate::config::APP_NAME,
    error_reporter::Report,
    gtk4::{
        glib::{self, MainLoop},
        prelude::{DialogExt, GtkWindowExt},
        ButtonsType, DialogFlags, MessageDialog, MessageType, Window,
    },
    std::{
        collections::HashMap,
        fs::File,
        io,
        path::Path,
        process::{Child, Command},
    },
    url::Url,
    zbus::{blocking::Connection, proxy, zvariant::Value},
};

const TOAST_TIMEOUT_MS: i32 = 3000;

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: &HashMap<&str, Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

#[proxy(
    interface = "org.freedesktop.FileManager1",
    default_service = "org.freedesktop.FileManager1",
    default_path = "/org/freedesktop/FileManager1"
)]
trait FileManager1 {
    fn show_items(&self, uris: &[&str], startup_id: &str) -> zbus::Result<()>;
}

/// Notifications and reveal go over the session bus, the error dialog is GTK.
pub struct Linux;

impl Host for Linux {
    fn spawn_with_redirected_output(&self, program: &Path, log: File) -> io::Result<Child> {
        spawn_redirected(program, log, |_| {})
    }

    fn show_toast(&self, title: &str, body: &str, icon: Option<&Path>) -> Result<(), HostError> {
        let session = Connection::session().map_err(HostError::DBus)?;
        let proxy = NotificationsProxyBlocking::new(&session).map_err(HostError::DBus)?;
        let icon = icon.map(|i| i.to_string_lossy()).unwrap_or_default();
        let id = proxy
            .notify(
                APP_NAME,
                0,
                &icon,
                title,
                body,
                &[],
                &HashMap::new(),
                TOAST_TIMEOUT_MS,
            )
            .map_err(HostError::DBus)?;
        log::debug!("Shown notification {id}");
        Ok(())
    }

    fn show_blocking_error_dialog(&self, title: &str, body: &str) -> Result<(), HostError> {
        let Err(e) = run_gtk_dialog(title, body) else {
            return Ok(());
        };
        log::warn!("Could not show GTK dialog: {}", Report::new(e));
        run_helper(
            "zenity",
            Command::new("zenity")
                .arg("--error")
                .arg("--no-markup")
                .arg(format!("--title={title}"))
                .arg(format!("--text={body}")),
        )
    }

    fn reveal_in_file_browser(&self, path: &Path) -> Result<(), HostError> {
        let Err(e) = show_items(path) else {
            return Ok(());
        };
        log::debug!("FileManager1 unavailable: {}", Report::new(e));
        let dir = path.parent().unwrap_or(path);
        run_helper("xdg-open", Command::new("xdg-open").arg(dir))
    }
}

fn show_items(path: &Path) -> Result<(), HostError> {
    let uri = Url::from_file_path(path)
        .map_err(|_| HostError::NotAFileUri(path.display().to_string()))?;
    let session = Connection::session().map_err(HostError::DBus)?;
    FileManager1ProxyBlocking::new(&session)
        .map_err(HostError::DBus)?
        .show_items(&[uri.as_str()], "")
        .map_err(HostError::DBus)
}

fn run_gtk_dialog(title: &str, body: &str) -> Result<(), HostError> {
    gtk4::init().map_err(HostError::Gtk)?;
    glib::set_prgname(Some("amcl-launcher"));

    let main_loop = MainLoop::new(None, false);
    let dialog = MessageDialog::new(
        Window::NONE,
        DialogFlags::MODAL,
        MessageType::Error,
        ButtonsType::Ok,
        body,
    );
    dialog.set_title(Some(title));
    let ml = main_loop.clone();
    dialog.connect_response(move |dialog, _| {
        dialog.close();
        ml.quit();
    });
    dialog.present();
    main_loop.run();
    Ok(())
}
