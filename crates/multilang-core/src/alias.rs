//! Static table mapping canonical short codes to the locale variants they cover.

use regex::RegexBuilder;

/// Canonical code and its comma-separated variants, in lookup order.
pub const ALIASES: &[(&str, &str)] = &[
    ("cn", "cn,zh,zh-hans,zh-cn,zh-hans-cn,zh-sg,zh-hans-sg"),
    ("tw", "tw,zh-hant,zh-hk,zh-mo,zh-tw,zh-hant-hk,zh-hant-mo,zh-hant-tw"),
    (
        "en",
        "en,en-au,en-bz,en-ca,en-cb,en-ie,en-jm,en-nz,en-ph,en-za,en-tt,en-gb,en-us,en-zw,en-sg",
    ),
    ("th", "th,th-th"),
    ("vi", "vn,vi-vn,vi,vn-vn"),
    ("ru", "ru,ru-ru,ru-mo"),
    ("id", "id,id-id,in-id"),
    ("ko", "ko,ko-kr"),
    ("hi", "in,hi,hi-in"),
    ("sg", "sg"),
    (
        "ar",
        "ar,ar-er,ar-sa,ar-eg,ar-dz,ar-tn,ar-ye,ar-jo,ar-kw,ar-bh,ar-iq,ar-ly,ar-ma,ar-om,ar-sy,ar-lb,ar-ae,ar-qa,ar-ss,ar-il",
    ),
    ("af", "af,af-za"),
    ("tr", "tr,tr-tr"),
    (
        "es",
        "es,es-ar,es-bo,es-cl,es-co,es-cr,es-do,es-ec,es-es,es-gt,es-hn,es-mx,es-ni,es-pa,es-pe,es-pr,es-py,es-sv,es-uy,es-ve,es-xl",
    ),
    ("ms", "ms,ms-bn,ms-my,my"),
    ("pt", "pt,pt-pt,pt-br"),
    ("ja", "ja,ja-jp,ja-ja,jp,jp-jp"),
    ("ur", "ur,ur-pk"),
    ("de", "de,de-at,de-ch,de-de,de-li,de-lu"),
    ("ne", "ne,ne-np"),
    ("bn", "bn,bn-bd,bn-in"),
];

/// Returns the canonical code of the first table entry whose variants contain
/// `code` between word boundaries, ignoring case.
///
/// Word boundaries include `-`, so a bare region such as `us` matches the
/// `en-us` variant.
pub fn lookup(code: &str) -> Option<&'static str> {
    lookup_in(ALIASES, code)
}

/// [`lookup`] against a caller-supplied table.
pub fn lookup_in(table: &[(&'static str, &str)], code: &str) -> Option<&'static str> {
    if code.is_empty() {
        return None;
    }

    let matcher = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(code)))
        .case_insensitive(true)
        .build()
        .ok()?;

    table
        .iter()
        .find(|(_, variants)| matcher.is_match(variants))
        .map(|(canonical, _)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("zh-cn", Some("cn"))]
    #[case("zh-tw", Some("tw"))]
    #[case("en-us", Some("en"))]
    #[case("EN-GB", Some("en"))]
    #[case("vn", Some("vi"))]
    #[case("pt-br", Some("pt"))]
    #[case("jp", Some("ja"))]
    #[case("ar-sa", Some("ar"))]
    #[case("fr", None)]
    #[case("fr-fr", None)]
    #[case("", None)]
    fn lookup_maps_variants(#[case] code: &str, #[case] expected: Option<&str>) {
        assert_eq!(lookup(code), expected);
    }

    #[test]
    fn lookup_takes_first_entry_in_table_order() {
        // `in` is listed under both `id` (as part of `in-id`) and `hi`.
        assert_eq!(lookup("in"), Some("id"));
        // `my` only appears in the `ms` entry.
        assert_eq!(lookup("my"), Some("ms"));
    }

    #[test]
    fn lookup_requires_whole_tokens() {
        assert_eq!(lookup("zh-han"), None);
        assert_eq!(lookup("e"), None);
    }

    #[test]
    fn lookup_escapes_regex_syntax() {
        assert_eq!(lookup("en.us"), None);
        assert_eq!(lookup("(en)"), None);
    }

    #[test]
    fn lookup_in_custom_table() {
        let table = [("first", "xx,yy"), ("second", "yy,zz")];
        assert_eq!(lookup_in(&table, "yy"), Some("first"));
        assert_eq!(lookup_in(&table, "zz"), Some("second"));
    }
}
