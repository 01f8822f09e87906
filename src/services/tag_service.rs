use std::collections::HashSet;

use crate::models::word::Word;

/// 所有单词标签的并集（去重），按首次出现的顺序排列
pub fn collect_tags(words: &[Word]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .flat_map(|w| w.tags.iter().map(String::as_str))
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}
