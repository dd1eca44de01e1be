//! Key-case conversion.
//!
//! Raw records arrive with either `camelCase` keys (JSON payloads) or
//! `snake_case` keys (database rows). Both functions here are total: any
//! input produces some output, nothing is rejected.

use alloc::string::String;

/// Converts `camelCase`, `PascalCase` and space separated words to `snake_case`.
///
/// An underscore is inserted before every uppercase character that is not
/// the first character, then everything is lowercased. Whitespace is removed
/// after capitalizing the word that follows it.
///
/// # Examples
///
/// ```
/// use dobj_utils::case::snake_case;
///
/// assert_eq!(snake_case("fooBar"), "foo_bar");
/// assert_eq!(snake_case("FooBar"), "foo_bar");
/// assert_eq!(snake_case("foo bar"), "foo_bar");
/// assert_eq!(snake_case("already_snake"), "already_snake");
/// ```
pub fn snake_case(input: &str) -> String {
    if input.chars().all(|c| c.is_lowercase() || c == '_' || c.is_ascii_digit()) {
        return String::from(input);
    }

    let mut out = String::with_capacity(input.len() + 4);
    let mut word_start = true;
    let mut first = true;

    for c in input.chars() {
        if c.is_whitespace() {
            word_start = true;
            continue;
        }

        let upper = c.is_uppercase() || (word_start && c.is_lowercase());
        if upper && !first {
            out.push('_');
        }
        out.extend(c.to_lowercase());

        word_start = false;
        first = false;
    }

    out
}

/// Converts `snake_case`, `kebab-case` and space separated words to `camelCase`.
///
/// Each separated word gets an uppercase first letter, the rest of the word
/// is kept as is; the very first letter of the result is lowercased.
///
/// # Examples
///
/// ```
/// use dobj_utils::case::camel_case;
///
/// assert_eq!(camel_case("foo_bar"), "fooBar");
/// assert_eq!(camel_case("user-id"), "userId");
/// assert_eq!(camel_case("fooBar"), "fooBar");
/// assert_eq!(camel_case("FooBar"), "fooBar");
/// ```
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for word in input.split([' ', '-', '_']) {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            if out.is_empty() {
                out.extend(head.to_lowercase());
            } else {
                out.extend(head.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}
