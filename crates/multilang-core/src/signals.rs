//! Raw inputs language detection works from.

use unic_langid::LanguageIdentifier;

/// The signals a host environment exposes about the user's language.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Signals {
    /// URL query string, e.g. `?lang=ar&location=sa`.
    pub query: String,
    /// User-agent string, which embedding apps may tag with `lang/xx`.
    pub user_agent: String,
    /// Locale reported by the browser or operating system.
    pub browser_locale: Option<String>,
}

impl Signals {
    pub fn new(
        query: impl Into<String>,
        user_agent: impl Into<String>,
        browser_locale: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            user_agent: user_agent.into(),
            browser_locale,
        }
    }

    /// Signals with the browser locale taken from the operating system.
    pub fn from_system() -> Self {
        Self::default().with_system_locale()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_browser_locale(mut self, locale: impl Into<String>) -> Self {
        self.browser_locale = Some(locale.into());
        self
    }

    /// Replaces the browser locale with the operating system locale, if any.
    pub fn with_system_locale(mut self) -> Self {
        match sys_locale::get_locale() {
            Some(locale) => {
                tracing::debug!("Detected system locale: {}", locale);
                self.browser_locale = Some(normalize_locale(&locale));
            },
            None => tracing::debug!("No system locale available"),
        }
        self
    }
}

/// Normalizes a platform locale string (`en_US`, `en-US.UTF-8`, `zh-Hant-TW`)
/// into the lower-case, hyphenated form used by the alias table.
pub fn normalize_locale(raw: &str) -> String {
    let trimmed = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    match trimmed.parse::<LanguageIdentifier>() {
        Ok(lang) => lang.to_string().to_lowercase(),
        Err(_) => trimmed.replace('_', "-").to_lowercase(),
    }
}
