//! Sentence and word boundaries for article text

/// Characters that may trail a sentence terminator, e.g. `."` or `?)`
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Splits text into sentences
///
/// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) that is followed by whitespace or the end of the text. Segments
/// without a single alphanumeric character are dropped, so stray punctuation
/// never counts as a sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        let mut end = text.len();
        while let Some(&(i, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') || CLOSERS.contains(&next) {
                chars.next();
            } else {
                end = i;
                break;
            }
        }

        let at_boundary = text[end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if at_boundary {
            push_sentence(&mut result, &text[start..end]);
            start = end;
        }
    }

    push_sentence(&mut result, &text[start..]);
    result
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if segment.chars().any(char::is_alphanumeric) {
        sentences.push(segment);
    }
}

/// Splits text into word tokens
///
/// Tokens are whitespace-separated with surrounding punctuation trimmed;
/// punctuation-only tokens are dropped. Inner punctuation is kept, so
/// `don't` and `step-by-step` are single words.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .collect()
}
