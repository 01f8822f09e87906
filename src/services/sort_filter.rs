use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::models::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "jp-asc")]
    JpAsc,
    #[serde(rename = "jp-desc")]
    JpDesc,
    #[serde(rename = "en-asc")]
    EnAsc,
    #[serde(rename = "en-desc")]
    EnDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::JpAsc => "jp-asc",
            SortOrder::JpDesc => "jp-desc",
            SortOrder::EnAsc => "en-asc",
            SortOrder::EnDesc => "en-desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jp-asc" => Ok(SortOrder::JpAsc),
            "jp-desc" => Ok(SortOrder::JpDesc),
            "en-asc" => Ok(SortOrder::EnAsc),
            "en-desc" => Ok(SortOrder::EnDesc),
            _ => Err(()),
        }
    }
}

/// 日文排序键：NFKC 统一全角/半角，片假名折叠为平假名，再转小写
fn japanese_key(s: &str) -> String {
    s.nfkc()
        .map(|c| match c {
            'ァ'..='ヶ' | 'ヽ' | 'ヾ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// 主键相同时按原始字符串比较，平假名因此排在对应的片假名之前
pub fn compare_japanese(a: &str, b: &str) -> Ordering {
    japanese_key(a).cmp(&japanese_key(b)).then_with(|| a.cmp(b))
}

pub fn compare_english(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// 返回排序后的新列表，不修改输入
pub fn sort_words_by(words: &[Word], order: SortOrder) -> Vec<Word> {
    let mut list = words.to_vec();
    match order {
        SortOrder::JpAsc => list.sort_by(|a, b| compare_japanese(&a.jp, &b.jp)),
        SortOrder::JpDesc => list.sort_by(|a, b| compare_japanese(&b.jp, &a.jp)),
        SortOrder::EnAsc => list.sort_by(|a, b| compare_english(&a.en, &b.en)),
        SortOrder::EnDesc => list.sort_by(|a, b| compare_english(&b.en, &a.en)),
    }
    list
}

/// 未知的排序类型保持原顺序
pub fn sort_words(words: &[Word], sort_type: &str) -> Vec<Word> {
    match sort_type.parse() {
        Ok(order) => sort_words_by(words, order),
        Err(()) => words.to_vec(),
    }
}

/// 选中多个标签时是“或”关系：包含任意一个即保留
pub fn filter_words_by_tag(words: &[Word], selected_tags: &[String]) -> Vec<Word> {
    if selected_tags.is_empty() {
        return words.to_vec();
    }
    words
        .iter()
        .filter(|w| w.tags.iter().any(|t| selected_tags.contains(t)))
        .cloned()
        .collect()
}
