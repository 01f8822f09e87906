//! 页面状态。每个更新函数按值接收旧状态并返回新状态，存储层不依赖这里的任何东西

use serde::{Deserialize, Serialize};

use crate::models::word::Word;
use crate::services::compose_service::join_selection;
use crate::services::input::{parse_tags, DraftRow};
use crate::services::sort_filter::{filter_words_by_tag, sort_words_by, SortOrder};

/// 输出页面：选中的日文单词（按点击顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSession {
    pub selected: Vec<String>,
}

impl OutputSession {
    /// 已选中则取消，否则追加到末尾
    pub fn toggle(mut self, jp: &str) -> Self {
        match self.selected.iter().position(|s| s == jp) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(jp.to_string()),
        }
        self
    }

    pub fn is_selected(&self, jp: &str) -> bool {
        self.selected.iter().any(|s| s == jp)
    }

    pub fn jp_text(&self) -> String {
        join_selection(&self.selected)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub sort: Option<SortOrder>,
    pub selected_tags: Vec<String>,
}

impl ListView {
    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    pub fn toggle_tag(mut self, tag: &str) -> Self {
        match self.selected_tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.selected_tags.remove(index);
            }
            None => self.selected_tags.push(tag.to_string()),
        }
        self
    }

    pub fn apply(&self, words: &[Word]) -> Vec<Word> {
        let filtered = filter_words_by_tag(words, &self.selected_tags);
        match self.sort {
            Some(order) => sort_words_by(&filtered, order),
            None => filtered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSession {
    pub rows: Vec<DraftRow>,
    #[serde(default)]
    pub active_row: usize,
}

impl Default for RegisterSession {
    fn default() -> Self {
        Self {
            rows: vec![DraftRow::default()],
            active_row: 0,
        }
    }
}

impl RegisterSession {
    pub fn add_row(mut self) -> Self {
        self.rows.push(DraftRow::default());
        self.active_row = self.rows.len() - 1;
        self
    }

    /// 至少保留一行
    pub fn remove_row(mut self, index: usize) -> Self {
        if self.rows.len() > 1 && index < self.rows.len() {
            self.rows.remove(index);
            self.active_row = self.active_row.min(self.rows.len() - 1);
        }
        self
    }

    pub fn focus(mut self, index: usize) -> Self {
        if index < self.rows.len() {
            self.active_row = index;
        }
        self
    }

    pub fn set_tags_text(mut self, index: usize, text: &str) -> Self {
        if let Some(row) = self.rows.get_mut(index) {
            row.tags = parse_tags(text);
        }
        self
    }

    pub fn toggle_tag_for_active_row(mut self, tag: &str) -> Self {
        if let Some(row) = self.rows.get_mut(self.active_row) {
            match row.tags.iter().position(|t| t == tag) {
                Some(index) => {
                    row.tags.remove(index);
                }
                None => row.tags.push(tag.to_string()),
            }
        }
        self
    }
}
