// Query normalization - turns raw user input into the canonical search key
//
// The same function produces the `indexed` column at ingestion time, so prefix
// search only matches when both sides went through here.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Characters folded to a single space before matching.
const SPACE_FOLDED: &[char] = &['-', '\'', '\u{2019}', '\u{02BC}'];

/// Normalize a raw query into its search key.
///
/// Lowercases, folds hyphens and apostrophes to spaces and strips accents
/// from Latin letters ("é" -> "e", "ø" -> "o"). Every other character is
/// kept as-is.
/// The function is total and idempotent.
pub fn normalize(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars().flat_map(char::to_lowercase) {
        if SPACE_FOLDED.contains(&c) {
            out.push(' ');
            continue;
        }
        match c {
            'œ' => out.push_str("oe"),
            'æ' => out.push_str("ae"),
            'ß' => out.push_str("ss"),
            // Stroked letters have no canonical decomposition
            'ø' => out.push('o'),
            'ł' => out.push('l'),
            'đ' => out.push('d'),
            _ => push_unaccented(c, &mut out),
        }
    }
    out
}

/// Push `c` without its combining marks when its base is ASCII.
fn push_unaccented(c: char, out: &mut String) {
    if c.is_ascii() {
        out.push(c);
        return;
    }

    let mut base = String::new();
    let mut has_mark = false;
    decompose_canonical(c, |d| {
        if is_combining_mark(d) {
            has_mark = true;
        } else {
            base.push(d);
        }
    });

    if has_mark && base.is_ascii() {
        out.push_str(&base);
    } else {
        out.push(c);
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
