use serde::Serialize;

use crate::error::{InputError, StoreError};
use crate::models::word::{NewWord, UpsertOutcome, Word};
use crate::services::input::{validate_rows, DraftRow};
use crate::services::word_store::WordStore;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterSummary {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// 逐行 upsert，每一行各自是一个事务。
/// 已存在且英文不同的单词交给 `confirm_overwrite` 决定是否覆盖
pub async fn register_rows<F>(
    store: &WordStore,
    rows: &[DraftRow],
    mut confirm_overwrite: F,
) -> Result<RegisterSummary, RegisterError>
where
    F: FnMut(&Word, &NewWord) -> bool,
{
    let words = validate_rows(rows)?;
    let mut summary = RegisterSummary::default();

    for word in &words {
        if let Some(existing) = store.find_by_jp(&word.jp).await? {
            if existing.en != word.en && !confirm_overwrite(&existing, word) {
                tracing::info!("--- 用户取消覆盖: jp={}", word.jp);
                summary.skipped += 1;
                continue;
            }
        }

        match store.add_or_update_by_jp(word).await?.0 {
            UpsertOutcome::Added => summary.added += 1,
            UpsertOutcome::Updated => summary.updated += 1,
        }
    }

    tracing::info!(
        "<<< 登录完成: 追加 {} 件 / 更新 {} 件 / 跳过 {} 件",
        summary.added,
        summary.updated,
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(jp: &str, en: &str) -> DraftRow {
        DraftRow {
            jp: jp.into(),
            en: en.into(),
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn counts_added_updated_and_declined() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = WordStore::init_at(&dir.path().join("words.db")).await.unwrap();
        store.add_or_update_by_jp(&NewWord::new("猫", "cat")).await.unwrap();
        store.add_or_update_by_jp(&NewWord::new("犬", "dog")).await.unwrap();

        let rows = vec![row("猫", "cat"), row("犬", "puppy"), row("鳥", "bird"), row("", "")];
        let mut asked = Vec::new();
        let summary = register_rows(&store, &rows, |existing, _| {
            asked.push(existing.jp.clone());
            false
        })
        .await
        .unwrap();

        assert_eq!(asked, vec!["犬"]);
        assert_eq!(summary, RegisterSummary { added: 1, updated: 1, skipped: 1 });
        assert_eq!(store.find_by_jp("犬").await.unwrap().unwrap().en, "dog");
    }

    #[tokio::test]
    async fn incomplete_rows_write_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = WordStore::init_at(&dir.path().join("words.db")).await.unwrap();

        let rows = vec![row("猫", "cat"), row("犬", "")];
        let err = register_rows(&store, &rows, |_, _| true).await.unwrap_err();

        assert!(matches!(err, RegisterError::Input(InputError::IncompleteRows(ref r)) if r == &vec![2]));
        assert!(store.get_all_words().await.unwrap().is_empty());
    }
}
