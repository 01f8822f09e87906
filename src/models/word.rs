use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 输出合成时连接多个日文单词的分隔符（全角顿号）
pub const JOIN_DELIMITER: char = '、';

/// CSV 第三列中标签之间的分隔符
pub const TAG_DELIMITER: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: i64,
    pub jp: String,
    pub en: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// 数据库中的原始行；第一代 schema 没有 tags 列，迁移前后都可能为 NULL
#[derive(Debug, FromRow)]
pub struct WordRow {
    pub id: i64,
    pub jp: String,
    pub en: String,
    pub tags: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<WordRow> for Word {
    type Error = serde_json::Error;

    fn try_from(row: WordRow) -> Result<Self, Self::Error> {
        let tags = match row.tags.as_deref() {
            Some(raw) => serde_json::from_str(raw)?,
            None => Vec::new(),
        };
        Ok(Word {
            id: row.id,
            jp: row.jp,
            en: row.en,
            tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// 写入请求：手动登录、批量导入都使用这个结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub jp: String,
    pub en: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewWord {
    pub fn new(jp: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            jp: jp.into(),
            en: en.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// 严格解析得到的 (jp, en) 对，不含标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub jp: String,
    pub en: String,
}

impl From<WordPair> for NewWord {
    fn from(pair: WordPair) -> Self {
        NewWord::new(pair.jp, pair.en)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Added,
    Updated,
}

/// 去掉空标签与重复标签，保留首次出现的顺序
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if tag.is_empty() || out.contains(tag) {
            continue;
        }
        out.push(tag.clone());
    }
    out
}
