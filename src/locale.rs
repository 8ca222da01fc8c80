#[cfg(not(all(unix, not(target_os = "macos"))))]
use error_reporter::Report;
use {language_tags::LanguageTag, std::env};

pub const FALLBACK_LANGUAGE: &str = "en";

const LOCALE_ENV: &str = "AMCL_LOCALE";

/// Returns the user's language as `primary-REGION` or `primary`.
///
/// Never fails: anything that cannot be read or parsed degrades to [`FALLBACK_LANGUAGE`].
pub fn get_system_language() -> String {
    if let Ok(value) = env::var(LOCALE_ENV) {
        if let Some(tag) = normalize_locale(&value) {
            return tag;
        }
        log::warn!("Ignoring unusable {LOCALE_ENV}={value:?}");
    }
    let Some(current) = host_locale() else {
        return FALLBACK_LANGUAGE.to_string();
    };
    match normalize_locale(&current) {
        Some(tag) => tag,
        None => {
            log::warn!("Could not parse current locale {current:?}");
            FALLBACK_LANGUAGE.to_string()
        }
    }
}

/// The raw POSIX locale, in the precedence order of `setlocale(LC_MESSAGES, "")`.
#[cfg(all(unix, not(target_os = "macos")))]
fn host_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn host_locale() -> Option<String> {
    match current_locale::current_locale() {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("Could not retrieve current locale: {}", Report::new(e));
            None
        }
    }
}

/// Turns host locale strings such as `zh_CN.UTF-8` or `de_DE@euro` into `zh-CN` / `de-DE`.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split(['.', '@', ' ']).next().unwrap_or_default();
    if raw.is_empty() || raw == "C" || raw == "POSIX" {
        return None;
    }
    let raw = raw.replace('_', "-");
    let tag = LanguageTag::parse(&raw).ok()?;
    let primary = tag.primary_language().to_ascii_lowercase();
    Some(match tag.region() {
        Some(region) => format!("{primary}-{}", region.to_ascii_uppercase()),
        None => primary,
    })
}
