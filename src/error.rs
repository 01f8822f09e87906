use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// 存储无法打开或迁移失败，本次会话不可用
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("word {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored tags are not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: expected exactly two fields (jp,en)")]
    MalformedRow { line: usize },

    #[error("line {line}: {field} contains the reserved character '、'")]
    IllegalCharacter { line: usize, field: &'static str },

    #[error("failed to read csv: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// 只填写了日文或英文其中之一的行号（从 1 开始）
    #[error("rows {0:?}: both jp and en are required")]
    IncompleteRows(Vec<usize>),

    #[error("jp and en are both required")]
    MissingField,

    #[error("{field} contains the reserved character '、'")]
    IllegalCharacter { field: &'static str },

    #[error("no words selected")]
    NothingSelected,
}
