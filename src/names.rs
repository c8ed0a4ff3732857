//! Naming conventions for per-binary build objects.

/// Upper-case the first character: `debug` → `Debug`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix a binary name: `("swiftCompile", "debug")` → `swiftCompileDebug`.
pub fn with_prefix(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, capitalize(name))
}

/// Turn a project name into a Swift module identifier.
///
/// Separators (`-`, `_`, `.`, whitespace) split words; each word is
/// capitalized: `json-utils` → `JsonUtils`. A leading digit gets an
/// underscore prefix so the result is a valid identifier.
pub fn to_module_name(project_name: &str) -> String {
    let joined: String = project_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect();
    if joined.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", joined)
    } else {
        joined
    }
}
