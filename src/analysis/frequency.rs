use crate::model::WordCount;
use std::collections::{HashMap, HashSet};

/// Ranks content words by frequency
///
/// Tokens are lowercased; anything that is not purely alphabetic or is a stop
/// word is ignored. The result holds at most `limit` entries ordered by count
/// descending, with ties kept in first-occurrence order.
pub fn most_frequent_words(
    tokens: &[&str],
    stop_words: &HashSet<&'static str>,
    limit: usize,
) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for token in tokens {
        let word = token.to_lowercase();
        if !word.chars().all(char::is_alphabetic) || stop_words.contains(word.as_str()) {
            continue;
        }

        match index.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount { word, count: 1 });
            }
        }
    }

    // stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
