use {
    env_logger::Env,
    log::{Level, LevelFilter},
};

const LOG_ENV: &str = "AMCL_LAUNCHER_LOG";

pub fn init() {
    let mut builder = env_logger::builder();
    if stderr_is_journal() {
        builder.format(|f, r| {
            use std::io::Write;
            let level = match r.level() {
                Level::Error => 3,
                Level::Warn => 4,
                Level::Info => 6,
                Level::Debug => 7,
                Level::Trace => 7,
            };
            write!(f, "<{level}>")?;
            if let Some(path) = r.module_path() {
                write!(f, "{path}: ")?;
            }
            writeln!(f, "{}", r.args())
        });
    } else {
        builder.format_timestamp_secs();
    }
    builder.filter_level(LevelFilter::Info).parse_default_env();
    if std::env::var_os(LOG_ENV).is_some() {
        builder.parse_env(Env::new().filter(LOG_ENV));
    }
    builder.init();
}

#[cfg(target_os = "linux")]
fn stderr_is_journal() -> bool {
    use std::{
        env,
        fs::File,
        mem::ManuallyDrop,
        os::{fd::FromRawFd, linux::fs::MetadataExt},
    };

    let Ok(journal_stream) = env::var("JOURNAL_STREAM") else {
        return false;
    };
    let Some((dev, ino)) = parse_journal_stream(&journal_stream) else {
        return false;
    };
    let stderr = unsafe { ManuallyDrop::new(File::from_raw_fd(2)) };
    let Ok(metadata) = stderr.metadata() else {
        return false;
    };
    metadata.st_dev() == dev && metadata.st_ino() == ino
}

#[cfg(not(target_os = "linux"))]
fn stderr_is_journal() -> bool {
    false
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_journal_stream(value: &str) -> Option<(u64, u64)> {
    let (dev, ino) = value.split_once(':')?;
    Some((dev.parse().ok()?, ino.parse().ok()?))
}
