//! Turns raw [`Signals`] into the canonical language identity of a session.

use crate::alias;
use crate::options::MultiLangOptions;
use crate::signals::Signals;
use regex::Regex;
use std::fmt;

/// Reading direction of the resolved language.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Value of the document `dir` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved language and country of a session.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Identity {
    pub language_code: String,
    /// Empty when no source carried a country code.
    pub country_code: String,
}

impl Identity {
    pub fn direction(&self, options: &MultiLangOptions) -> Direction {
        if options.is_rtl(&self.language_code) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn is_rtl(&self, options: &MultiLangOptions) -> bool {
        self.direction(options) == Direction::Rtl
    }
}

/// A code pair extracted from one signal source.
#[derive(Debug, Default)]
struct Detected {
    lang: Option<String>,
    country: Option<String>,
}

impl Detected {
    fn from_source(source: &str, lang: &Regex, country: &Regex) -> Self {
        let source = source.to_lowercase();
        Self {
            lang: capture(lang, &source),
            country: capture(country, &source),
        }
    }
}

fn capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|code| !code.is_empty())
}

/// Resolves the language identity of a session.
///
/// The URL query wins over the user agent, which wins over the browser
/// locale. The detected code is then mapped onto the allow-list by
/// [`canonicalize`]; when nothing is detected the default language is used.
pub fn resolve(signals: &Signals, options: &MultiLangOptions) -> Identity {
    let from_url = Detected::from_source(
        &signals.query,
        &options.lang_url_pattern,
        &options.location_url_pattern,
    );
    let from_ua = Detected::from_source(
        &signals.user_agent,
        &options.lang_ua_pattern,
        &options.location_ua_pattern,
    );

    let working = from_url
        .lang
        .or(from_ua.lang)
        .or_else(|| signals.browser_locale.clone())
        .unwrap_or_default()
        .to_lowercase();
    let country_code = from_url.country.or(from_ua.country).unwrap_or_default();

    let language_code = if working.is_empty() {
        options.default_lang.clone()
    } else {
        canonicalize(&working, options)
    };
    tracing::debug!(
        "Resolved language '{}' (detected '{}'), country '{}'",
        language_code,
        working,
        country_code
    );

    Identity {
        language_code,
        country_code,
    }
}

/// Maps a detected code onto the configured allow-list.
///
/// An empty allow-list accepts any code and a listed code is kept verbatim.
/// Otherwise the alias table decides, and the default language is used when
/// no alias entry covers the code.
pub fn canonicalize(code: &str, options: &MultiLangOptions) -> String {
    if options.supported.is_empty() || options.supports(code) {
        return code.to_string();
    }

    match alias::lookup(code) {
        Some(canonical) => canonical.to_string(),
        None => {
            tracing::debug!(
                "No alias for '{}', falling back to '{}'",
                code,
                options.default_lang
            );
            options.default_lang.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn supported(codes: &[&str]) -> MultiLangOptions {
        MultiLangOptions::default().with_supported(codes.iter().copied())
    }

    #[test]
    fn url_wins_over_user_agent_and_browser() {
        let signals = Signals::default()
            .with_query("?foo=1&lang=th&location=TH")
            .with_user_agent("Mozilla/5.0 lang/vi location/vn")
            .with_browser_locale("id");

        let identity = resolve(&signals, &MultiLangOptions::default());

        assert_eq!(identity.language_code, "th");
        assert_eq!(identity.country_code, "th");
    }

    #[test]
    fn user_agent_wins_over_browser() {
        let signals = Signals::default()
            .with_user_agent("Mozilla/5.0 (Linux) App/2.1 lang/vi location/vn")
            .with_browser_locale("id");

        let identity = resolve(&signals, &MultiLangOptions::default());

        assert_eq!(identity.language_code, "vi");
        assert_eq!(identity.country_code, "vn");
    }

    #[test]
    fn country_sources_are_independent_of_language_sources() {
        let signals = Signals::default()
            .with_query("?lang=ar")
            .with_user_agent("App lang/vi location/sa");

        let identity = resolve(&signals, &MultiLangOptions::default());

        assert_eq!(identity.language_code, "ar");
        assert_eq!(identity.country_code, "sa");
    }

    #[test]
    fn browser_locale_is_lower_cased() {
        let signals = Signals::default().with_browser_locale("zh-CN");

        let identity = resolve(&signals, &MultiLangOptions::default());

        assert_eq!(identity.language_code, "zh-cn");
        assert_eq!(identity.country_code, "");
    }

    #[test]
    fn browser_locale_is_aliased_when_not_supported() {
        let signals = Signals::default().with_browser_locale("zh-CN");

        let identity = resolve(&signals, &supported(&["cn", "en"]));

        assert_eq!(identity.language_code, "cn");
    }

    #[test]
    fn url_region_code_resolves_through_alias_table() {
        let options = supported(&["en", "fr"])
            .with_lang_url_pattern(r"\blang=([\w-]+)")
            .unwrap();
        let signals = Signals::default()
            .with_query("?lang=en-us")
            .with_browser_locale("fr");

        let identity = resolve(&signals, &options);

        assert_eq!(identity.language_code, "en");
    }

    #[test]
    fn default_url_pattern_stops_at_word_boundary() {
        let signals = Signals::default().with_query("?lang=pt-br&x=1");

        let identity = resolve(&signals, &MultiLangOptions::default());

        assert_eq!(identity.language_code, "pt");
    }

    #[test]
    fn nothing_detected_falls_back_to_default() {
        let identity = resolve(&Signals::default(), &supported(&["ar", "vi"]));
        assert_eq!(identity.language_code, "en");
    }

    #[test]
    fn nothing_detected_without_allow_list_uses_default() {
        let identity = resolve(&Signals::default(), &MultiLangOptions::default());
        assert_eq!(identity.language_code, "en");

        let options = MultiLangOptions::default().with_default_lang("vi");
        let identity = resolve(&Signals::default().with_query("?foo=1"), &options);
        assert_eq!(identity.language_code, "vi");
        assert_eq!(identity.country_code, "");
    }

    #[rstest]
    #[case::verbatim_member_is_never_aliased("zh", &["zh", "cn"], "zh")]
    #[case::verbatim_region_member("en-us", &["en-us"], "en-us")]
    #[case::alias_hit("ar-eg", &["ar", "en"], "ar")]
    #[case::first_alias_entry_wins("in", &["hi", "en"], "id")]
    #[case::no_alias_uses_default("fr", &["ar", "en"], "en")]
    #[case::alias_result_need_not_be_supported("ko-kr", &["ar"], "ko")]
    fn canonicalize_against_allow_list(
        #[case] code: &str,
        #[case] allow: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(canonicalize(code, &supported(allow)), expected);
    }

    #[rstest]
    #[case("fr-ca")]
    #[case("zh-cn")]
    #[case("anything")]
    fn empty_allow_list_keeps_code(#[case] code: &str) {
        assert_eq!(canonicalize(code, &MultiLangOptions::default()), code);
    }

    #[test]
    fn custom_default_language() {
        let options = supported(&["ar", "vi"]).with_default_lang("vi");
        assert_eq!(canonicalize("xx", &options), "vi");
    }

    #[test]
    fn direction_follows_rtl_list() {
        let options = MultiLangOptions::default();
        let arabic = Identity {
            language_code: "ar".to_string(),
            country_code: String::new(),
        };
        let english = Identity {
            language_code: "en".to_string(),
            country_code: String::new(),
        };

        assert_eq!(arabic.direction(&options), Direction::Rtl);
        assert!(arabic.is_rtl(&options));
        assert_eq!(english.direction(&options), Direction::Ltr);
        assert_eq!(Direction::Rtl.to_string(), "rtl");
    }
}
