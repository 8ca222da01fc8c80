use {
    crate::{
        catalog::{fill_template, Catalog, MessageId},
        platform::{Host, HostError},
    },
    error_reporter::Report,
    std::path::{Path, PathBuf},
};

/// Shows localized notices through the host. Nothing here is allowed to fail the run.
pub struct Notifier<'a> {
    host: &'a dyn Host,
    catalog: &'a Catalog,
    language: String,
    icon: Option<PathBuf>,
}

impl<'a> Notifier<'a> {
    pub fn new(host: &'a dyn Host, catalog: &'a Catalog, language: String) -> Self {
        Self {
            host,
            catalog,
            language,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<PathBuf>) -> Self {
        self.icon = icon;
        self
    }

    pub fn show_first_launch_notice(&self) {
        let title = self.text(MessageId::ToastTitle);
        let body = self.text(MessageId::ToastMessage);
        let res = self.host.show_toast(&title, &body, self.icon.as_deref());
        swallow("first launch notice", res);
    }

    pub fn show_error_message(&self, log_path: &Path) {
        let title = self.text(MessageId::ErrorTitle);
        let template = self.text(MessageId::ErrorMessage);
        let body = fill_template(&template, &log_path.display().to_string());
        let res = self.host.show_blocking_error_dialog(&title, &body);
        swallow("error dialog", res);
    }

    pub fn reveal_log_location(&self, log_path: &Path) {
        let res = self.host.reveal_in_file_browser(log_path);
        swallow("log location", res);
    }

    fn text(&self, id: MessageId) -> String {
        self.catalog.text(id, &self.language)
    }
}

fn swallow(what: &str, res: Result<(), HostError>) {
    if let Err(e) = res {
        log::warn!("Could not show {what}: {}", Report::new(e));
    }
}
