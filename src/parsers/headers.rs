use regex::Regex;

/// Value of the first `Name: value` line in a raw header dump.
///
/// Matching is case-insensitive and line-anchored; a header with an empty
/// value counts as absent.
pub fn header_value(raw: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?im)^{}:[ \t]*([^\r\n]*)", regex::escape(name))).ok()?;
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}
