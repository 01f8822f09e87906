use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::word::{normalize_tags, NewWord, JOIN_DELIMITER};

/// 登录页面的一行输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRow {
    #[serde(default)]
    pub jp: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DraftRow {
    fn is_blank(&self) -> bool {
        self.jp.is_empty() && self.en.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// jp 与 en 都被清空，视为删除请求
    Delete,
    Update(NewWord),
}

/// 标签输入框：逗号分隔，去空白、去空项、去重
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn check_join_delimiter(jp: &str, en: &str) -> Result<(), InputError> {
    if jp.contains(JOIN_DELIMITER) {
        return Err(InputError::IllegalCharacter { field: "jp" });
    }
    if en.contains(JOIN_DELIMITER) {
        return Err(InputError::IllegalCharacter { field: "en" });
    }
    Ok(())
}

/// 完全空白的行忽略；只填了一半的行全部报告出来（行号从 1 开始）
pub fn validate_rows(rows: &[DraftRow]) -> Result<Vec<NewWord>, InputError> {
    let incomplete: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_blank() && (r.jp.is_empty() || r.en.is_empty()))
        .map(|(i, _)| i + 1)
        .collect();
    if !incomplete.is_empty() {
        return Err(InputError::IncompleteRows(incomplete));
    }

    let mut words = Vec::new();
    for row in rows.iter().filter(|r| !r.is_blank()) {
        check_join_delimiter(&row.jp, &row.en)?;
        words.push(NewWord {
            jp: row.jp.clone(),
            en: row.en.clone(),
            tags: row.tags.clone(),
        });
    }
    Ok(words)
}

pub fn validate_edit(jp: &str, en: &str, tags: &[String]) -> Result<EditAction, InputError> {
    let jp = jp.trim();
    let en = en.trim();

    if jp.is_empty() && en.is_empty() {
        return Ok(EditAction::Delete);
    }
    if jp.is_empty() || en.is_empty() {
        return Err(InputError::MissingField);
    }
    check_join_delimiter(jp, en)?;

    Ok(EditAction::Update(NewWord {
        jp: jp.to_string(),
        en: en.to_string(),
        tags: normalize_tags(&tags.iter().map(|t| t.trim().to_string()).collect::<Vec<_>>()),
    }))
}
