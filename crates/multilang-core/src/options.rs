//! Loader options.

use crate::error::OptionsError;
use crate::payload::{Payload, PayloadFormat};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

/// Callback invoked once the language payload of a session has loaded.
pub type LoadedCallback = Arc<dyn Fn(Option<Arc<Payload>>) + Send + Sync>;

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_VERSION: &str = "1";
pub const DEFAULT_LANG_URL_PATTERN: &str = r"\blang=(.+?)\b";
pub const DEFAULT_LANG_UA_PATTERN: &str = r"\blang/(.+?)\b";
pub const DEFAULT_LOCATION_URL_PATTERN: &str = r"\blocation=(.+?)\b";
pub const DEFAULT_LOCATION_UA_PATTERN: &str = r"\blocation/(.+?)\b";
pub const DEFAULT_RTL: &[&str] = &["ar"];

/// Configuration of a language loader. Immutable once handed to a loader.
#[derive(Clone)]
pub struct MultiLangOptions {
    /// Codes the application ships language files for. Empty accepts any code.
    pub supported: Vec<String>,
    /// Base path or URL the language files are served from.
    pub path: String,
    /// Code used when detection yields nothing usable.
    pub default_lang: String,
    /// Cache-busting version appended to resource requests.
    pub version: String,
    pub lang_url_pattern: Regex,
    pub lang_ua_pattern: Regex,
    pub location_url_pattern: Regex,
    pub location_ua_pattern: Regex,
    /// Codes rendered right-to-left.
    pub rtl: Vec<String>,
    pub format: PayloadFormat,
    pub on_loaded: Option<LoadedCallback>,
}

impl Default for MultiLangOptions {
    fn default() -> Self {
        Self {
            supported: Vec::new(),
            path: String::new(),
            default_lang: DEFAULT_LANG.to_string(),
            version: DEFAULT_VERSION.to_string(),
            lang_url_pattern: builtin_pattern(DEFAULT_LANG_URL_PATTERN),
            lang_ua_pattern: builtin_pattern(DEFAULT_LANG_UA_PATTERN),
            location_url_pattern: builtin_pattern(DEFAULT_LOCATION_URL_PATTERN),
            location_ua_pattern: builtin_pattern(DEFAULT_LOCATION_UA_PATTERN),
            rtl: DEFAULT_RTL.iter().map(|code| code.to_string()).collect(),
            format: PayloadFormat::default(),
            on_loaded: None,
        }
    }
}

impl fmt::Debug for MultiLangOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLangOptions")
            .field("supported", &self.supported)
            .field("path", &self.path)
            .field("default_lang", &self.default_lang)
            .field("version", &self.version)
            .field("lang_url_pattern", &self.lang_url_pattern.as_str())
            .field("lang_ua_pattern", &self.lang_ua_pattern.as_str())
            .field("location_url_pattern", &self.location_url_pattern.as_str())
            .field("location_ua_pattern", &self.location_ua_pattern.as_str())
            .field("rtl", &self.rtl)
            .field("format", &self.format)
            .field("on_loaded", &self.on_loaded.is_some())
            .finish()
    }
}

impl MultiLangOptions {
    /// Sets the allow-list. Codes are lower-cased to match detected codes.
    pub fn with_supported<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.supported = lower_cased(codes);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_default_lang(mut self, code: impl AsRef<str>) -> Self {
        self.default_lang = code.as_ref().to_lowercase();
        self
    }

    pub fn with_version(mut self, version: impl ToString) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_rtl<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rtl = lower_cased(codes);
        self
    }

    pub fn with_format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_on_loaded<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<Arc<Payload>>) + Send + Sync + 'static,
    {
        self.on_loaded = Some(Arc::new(callback));
        self
    }

    pub fn with_lang_url_pattern(mut self, pattern: &str) -> Result<Self, OptionsError> {
        self.lang_url_pattern = compile_pattern("lang_url_pattern", pattern)?;
        Ok(self)
    }

    pub fn with_lang_ua_pattern(mut self, pattern: &str) -> Result<Self, OptionsError> {
        self.lang_ua_pattern = compile_pattern("lang_ua_pattern", pattern)?;
        Ok(self)
    }

    pub fn with_location_url_pattern(mut self, pattern: &str) -> Result<Self, OptionsError> {
        self.location_url_pattern = compile_pattern("location_url_pattern", pattern)?;
        Ok(self)
    }

    pub fn with_location_ua_pattern(mut self, pattern: &str) -> Result<Self, OptionsError> {
        self.location_ua_pattern = compile_pattern("location_ua_pattern", pattern)?;
        Ok(self)
    }

    /// Whether `code` is listed verbatim in the allow-list.
    pub fn supports(&self, code: &str) -> bool {
        self.supported.iter().any(|supported| supported == code)
    }

    /// Whether `code` is read right-to-left.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.rtl.iter().any(|rtl| rtl == code)
    }

    /// File name of the language resource for `code`, e.g. `en.json`.
    pub fn resource_file(&self, code: &str) -> String {
        format!("{}.{}", code, self.format.extension())
    }
}

/// Compiles a case-insensitive detection pattern. The first capture group
/// holds the extracted code.
pub fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex, OptionsError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| OptionsError::InvalidPattern { field, source })?;

    if regex.captures_len() < 2 {
        return Err(OptionsError::MissingCaptureGroup { field });
    }

    Ok(regex)
}

fn lower_cased<I, S>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| code.as_ref().to_lowercase())
        .collect()
}

fn builtin_pattern(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("built-in detection pattern is valid")
}
