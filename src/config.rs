use std::{
    env,
    path::{Path, PathBuf},
};

const STATE_DIR_NAME: &str = ".amcl";
const DEFAULT_TARGET: &str = "amcl.dist/amcl";
/// Packaging and debugging override for the supervised program. Not part of the
/// launcher's user-facing contract; release bundles always run [`DEFAULT_TARGET`].
const TARGET_ENV: &str = "AMCL_LAUNCHER_TARGET";
const ICON_PATH: [&str; 4] = ["assets", "img", "logo", "logo-256x.png"];

pub const APP_NAME: &str = "AMCL";

/// Everything the launcher needs to know before it starts doing work.
#[derive(Debug, Clone)]
pub struct Config {
    pub state_root: PathBuf,
    pub target: PathBuf,
    pub icon: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let home = home::home_dir()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_default();
        let target = env::var_os(TARGET_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET));
        Self::new(home.join(STATE_DIR_NAME), target)
    }

    pub fn new(state_root: PathBuf, target: PathBuf) -> Self {
        let icon = icon_for(&target).filter(|p| p.is_file());
        Self {
            state_root,
            target,
            icon,
        }
    }
}

fn icon_for(target: &Path) -> Option<PathBuf> {
    let mut icon = target.parent()?.to_path_buf();
    icon.extend(ICON_PATH);
    Some(icon)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::test_support::ENV_LOCK, std::fs, tempfile::TempDir};

    fn target_with(value: Option<&str>) -> PathBuf {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved = env::var_os(TARGET_ENV);
        match value {
            Some(v) => env::set_var(TARGET_ENV, v),
            None => env::remove_var(TARGET_ENV),
        }
        let target = Config::from_env().target;
        match saved {
            Some(v) => env::set_var(TARGET_ENV, v),
            None => env::remove_var(TARGET_ENV),
        }
        target
    }

    #[test]
    fn target_defaults_to_the_bundled_program() {
        assert_eq!(target_with(None), Path::new(DEFAULT_TARGET));
        assert_eq!(target_with(Some("")), Path::new(DEFAULT_TARGET));
    }

    #[test]
    fn target_can_be_overridden() {
        assert_eq!(target_with(Some("/opt/amcl/amcl")), Path::new("/opt/amcl/amcl"));
    }

    #[test]
    fn state_root_is_dot_amcl() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert!(Config::from_env().state_root.ends_with(STATE_DIR_NAME));
    }

    #[test]
    fn icon_is_only_used_when_present() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("amcl.dist").join("amcl");

        let config = Config::new(dir.path().join(".amcl"), target.clone());
        assert_eq!(config.icon, None);

        let icon = icon_for(&target).unwrap();
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();
        let config = Config::new(dir.path().join(".amcl"), target);
        assert_eq!(config.icon, Some(icon));
    }

    #[test]
    fn icon_lives_next_to_the_target() {
        let icon = icon_for(Path::new("amcl.dist/amcl")).unwrap();
        assert_eq!(
            icon,
            Path::new("amcl.dist")
                .join("assets")
                .join("img")
                .join("logo")
                .join("logo-256x.png")
        );
    }
}
