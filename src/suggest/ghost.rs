//! Ghost-text derivation
//!
//! Pure helpers: no state, safe to call from render code and tests.

/// Case-insensitive prefix test, compared one character at a time
pub fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    let mut candidate_chars = candidate.chars();
    prefix
        .chars()
        .all(|p| candidate_chars.next().is_some_and(|c| chars_match(c, p)))
}

fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Suffix of `candidate` beyond what the user has typed
///
/// Empty unless `candidate` starts with `input` (ignoring case) and is
/// strictly longer. Lengths are counted in characters so the split never
/// lands inside a multi-byte code point.
pub fn ghost_text<'a>(input: &str, candidate: &'a str) -> &'a str {
    if !starts_with_ignore_case(candidate, input) {
        return "";
    }

    let typed = input.chars().count();
    match candidate.char_indices().nth(typed) {
        Some((offset, _)) => &candidate[offset..],
        None => "",
    }
}

#[cfg(test)]
#[path = "ghost_tests.rs"]
mod ghost_tests;
