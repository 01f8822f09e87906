use crate::error::{InputError, StoreError};
use crate::models::word::JOIN_DELIMITER;
use crate::services::word_store::WordStore;

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Composition {
    /// 选中的日文单词以「、」连接
    pub jp: String,
    /// 对应的英文以 ", " 连接，找不到的单词被跳过
    pub en: String,
    pub missing: Vec<String>,
}

pub fn join_selection(selected: &[String]) -> String {
    selected.join(JOIN_DELIMITER.to_string().as_str())
}

/// 按选择顺序逐个查找英文并拼接
pub async fn compose(store: &WordStore, selected: &[String]) -> Result<Composition, ComposeError> {
    if selected.is_empty() {
        return Err(InputError::NothingSelected.into());
    }

    let mut en_parts = Vec::new();
    let mut missing = Vec::new();

    for jp in selected {
        match store.find_by_jp(jp).await? {
            Some(word) => en_parts.push(word.en),
            None => {
                tracing::warn!("--- 选中的单词已不存在: jp={}", jp);
                missing.push(jp.clone());
            }
        }
    }

    Ok(Composition {
        jp: join_selection(selected),
        en: en_parts.join(", "),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::word::NewWord;

    #[test]
    fn selection_is_joined_with_full_width_comma() {
        let selected = vec!["猫".to_string(), "犬".to_string()];
        assert_eq!(join_selection(&selected), "猫、犬");
    }

    #[tokio::test]
    async fn compose_follows_selection_order_and_skips_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = WordStore::init_at(&dir.path().join("words.db")).await.unwrap();
        store.add_or_update_by_jp(&NewWord::new("猫", "cat")).await.unwrap();
        store.add_or_update_by_jp(&NewWord::new("犬", "dog")).await.unwrap();

        let selected: Vec<String> = ["犬", "鳥", "猫"].iter().map(|s| s.to_string()).collect();
        let out = compose(&store, &selected).await.unwrap();

        assert_eq!(out.jp, "犬、鳥、猫");
        assert_eq!(out.en, "dog, cat");
        assert_eq!(out.missing, vec!["鳥"]);
    }

    #[tokio::test]
    async fn empty_selection_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = WordStore::init_at(&dir.path().join("words.db")).await.unwrap();
        let err = compose(&store, &[]).await.unwrap_err();
        assert!(matches!(err, ComposeError::Input(InputError::NothingSelected)));
    }
}
