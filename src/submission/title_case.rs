//! Title-casing of backend identifiers for display

/// Capitalize the first letter of every word and lower-case the rest
///
/// A word is a run of alphanumeric characters or underscores. An apostrophe
/// between two word characters stays inside the word, so `child's pose`
/// becomes `Child's Pose`. A plain `\b\w` word-boundary rule would give
/// `Child'S Pose` instead; that is intentionally not followed here.
/// Everything else is copied through unchanged.
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if is_word_char(ch) {
            if in_word {
                push_mapped(&mut out, ch, ch.to_lowercase());
            } else {
                push_mapped(&mut out, ch, ch.to_uppercase());
            }
            in_word = true;
        } else {
            in_word = in_word
                && is_apostrophe(ch)
                && chars.peek().is_some_and(|next| is_word_char(*next));
            out.push(ch);
        }
    }

    out
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}

// Multi-char case expansions (e.g. 'ß' -> "SS") keep the original character
// so a second pass produces the same string.
fn push_mapped(out: &mut String, original: char, mut mapped: impl Iterator<Item = char>) {
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => out.push(single),
        _ => out.push(original),
    }
}

#[cfg(test)]
#[path = "title_case_tests.rs"]
mod title_case_tests;
