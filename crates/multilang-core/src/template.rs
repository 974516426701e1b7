//! `%s` placeholder substitution.

/// Token replaced by one argument.
pub const PLACEHOLDER: &str = "%s";

/// Replaces `%s` placeholders in `base` with `args`, left to right.
///
/// Placeholders without a matching argument stay literal and surplus
/// arguments are ignored. Substituted text is never scanned again.
pub fn fill_placeholders<I, S>(base: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::with_capacity(base.len());
    let mut rest = base;

    for arg in args {
        let Some(idx) = rest.find(PLACEHOLDER) else {
            break;
        };
        out.push_str(&rest[..idx]);
        out.push_str(arg.as_ref());
        rest = &rest[idx + PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    out
}
