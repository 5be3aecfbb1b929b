//! Case conversions applied to barclamp names.
//!
//! Barclamp names are snake_case identifiers (`network`, `ipmi_tools`). The
//! skeleton generator and the engine mount need them in several other forms.

/// Word separator inside barclamp names
const WORD_SEPARATOR: char = '_';

/// Uppercase the first character, leaving the rest unchanged
///
/// # Examples
/// ```ignore
/// assert_eq!(upcase_first("hello"), "Hello");
/// assert_eq!(upcase_first("hELLO"), "HELLO");
/// ```
pub fn upcase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character and lowercase the rest
///
/// `ipmi_TOOLS` becomes `Ipmi_tools`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper camel case: split on `_`, uppercase each segment's first character, concatenate
///
/// `ipmi_tools` becomes `IpmiTools`.
pub fn camelize(name: &str) -> String {
    name.split(WORD_SEPARATOR).map(upcase_first).collect()
}

/// Class-name form: split on `_`, capitalize each segment, concatenate
///
/// Unlike [`camelize`] the rest of each segment is lowercased, so
/// `NTP_server` becomes `NtpServer`.
pub fn capitalize_words(name: &str) -> String {
    name.split(WORD_SEPARATOR).map(capitalize).collect()
}

/// Human readable form: drop a trailing `_id`, underscores become spaces, first letter uppercased
///
/// `ipmi_tools` becomes `Ipmi tools`.
pub fn humanize(name: &str) -> String {
    let trimmed = name.strip_suffix("_id").unwrap_or(name);
    let spaced = trimmed.replace(WORD_SEPARATOR, " ");
    capitalize(&spaced)
}
