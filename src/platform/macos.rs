use {
    super::{run_helper, spawn_redirected, Host, HostError},
    std::{
        fs::File,
        io,
        path::Path,
        process::{Child, Command},
    },
};

/// Everything user-facing goes through `osascript` and `open`.
pub struct MacOs;

impl Host for MacOs {
    fn spawn_with_redirected_output(&self, program: &Path, log: File) -> io::Result<Child> {
        spawn_redirected(program, log, |_| {})
    }

    fn show_toast(&self, title: &str, body: &str, _icon: Option<&Path>) -> Result<(), HostError> {
        let script = format!(
            "display notification {} with title {}",
            quote(body),
            quote(title),
        );
        osascript(&script)
    }

    fn show_blocking_error_dialog(&self, title: &str, body: &str) -> Result<(), HostError> {
        let script = format!(
            "display dialog {} with title {} buttons {{\"OK\"}} default button \"OK\" with icon stop",
            quote(body),
            quote(title),
        );
        osascript(&script)
    }

    fn reveal_in_file_browser(&self, path: &Path) -> Result<(), HostError> {
        run_helper("open", Command::new("open").arg("-R").arg(path))
    }
}

fn osascript(script: &str) -> Result<(), HostError> {
    run_helper("osascript", Command::new("osascript").arg("-e").arg(script))
}

/// AppleScript string literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
