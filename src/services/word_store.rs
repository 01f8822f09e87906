use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::word::{normalize_tags, NewWord, UpsertOutcome, Word, WordRow};
use crate::services::schema::{self, CURRENT_GENERATION};
use crate::services::tag_service;

const SELECT_WORD: &str = "SELECT id, jp, en, tags, created_at, updated_at FROM words";

/// 单词的持久化存储。连接池只保留一个连接，所有操作按顺序执行
#[derive(Clone)]
pub struct WordStore {
    pool: SqlitePool,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn encode_tags(tags: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&normalize_tags(tags))?)
}

pub(crate) async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool, StoreError> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options.create_if_missing(true))
        .await
        .map_err(|e| StoreError::StorageUnavailable(e.to_string()))
}

impl WordStore {
    /// 打开（或新建）存储，并在同一次打开中完成 schema 迁移
    pub async fn init(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
        Self::init_with(options).await
    }

    pub async fn init_at(path: &Path) -> Result<Self, StoreError> {
        Self::init_with(SqliteConnectOptions::new().filename(path)).await
    }

    async fn init_with(options: SqliteConnectOptions) -> Result<Self, StoreError> {
        let pool = connect(options).await?;
        let migrated = schema::migrate_to(&pool, CURRENT_GENERATION).await;
        if migrated.is_err() {
            pool.close().await;
        }
        match migrated {
            Ok(_) => Ok(Self { pool }),
            Err(StoreError::StorageUnavailable(reason)) => {
                tracing::error!("!!! 存储打开失败: {}", reason);
                Err(StoreError::StorageUnavailable(reason))
            }
            Err(e) => {
                tracing::error!("!!! schema 迁移失败: {}", e);
                Err(StoreError::StorageUnavailable(e.to_string()))
            }
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// 按 jp 查找，存在则覆盖 en/tags，否则新增。查找与写入在同一事务内
    pub async fn add_or_update_by_jp(
        &self,
        word: &NewWord,
    ) -> Result<(UpsertOutcome, Word), StoreError> {
        let tags = encode_tags(&word.tags)?;
        let now = now_ms();
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM words WHERE jp = ?1 ORDER BY id LIMIT 1")
                .bind(&word.jp)
                .fetch_optional(&mut *tx)
                .await?;

        let (outcome, id) = match existing {
            Some((id,)) => {
                sqlx::query("UPDATE words SET en = ?1, tags = ?2, updated_at = ?3 WHERE id = ?4")
                    .bind(&word.en)
                    .bind(&tags)
                    .bind(now)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                (UpsertOutcome::Updated, id)
            }
            None => {
                let result = sqlx::query(
                    "INSERT INTO words (jp, en, tags, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
                )
                .bind(&word.jp)
                .bind(&word.en)
                .bind(&tags)
                .bind(now)
                .execute(&mut *tx)
                .await?;
                (UpsertOutcome::Added, result.last_insert_rowid())
            }
        };

        let row: WordRow = sqlx::query_as(&format!("{SELECT_WORD} WHERE id = ?1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!("<<< 单词已保存: jp={}, id={}, 结果={:?}", word.jp, id, outcome);
        Ok((outcome, Word::try_from(row)?))
    }

    pub async fn get_all_words(&self) -> Result<Vec<Word>, StoreError> {
        let rows: Vec<WordRow> = sqlx::query_as(&format!("{SELECT_WORD} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| Word::try_from(row).map_err(StoreError::from))
            .collect()
    }

    pub async fn get_word_by_id(&self, id: i64) -> Result<Option<Word>, StoreError> {
        let row: Option<WordRow> = sqlx::query_as(&format!("{SELECT_WORD} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Word::try_from).transpose()?)
    }

    /// 按 id 整体替换 jp/en/tags，刷新 updated_at
    pub async fn update_word(&self, id: i64, word: &NewWord) -> Result<Word, StoreError> {
        let tags = encode_tags(&word.tags)?;
        let result =
            sqlx::query("UPDATE words SET jp = ?1, en = ?2, tags = ?3, updated_at = ?4 WHERE id = ?5")
                .bind(&word.jp)
                .bind(&word.en)
                .bind(&tags)
                .bind(now_ms())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            tracing::warn!("--- 尝试更新不存在的单词: ID={}", id);
            return Err(StoreError::NotFound(id));
        }

        tracing::info!("<<< 单词更新成功: ID={}", id);
        self.get_word_by_id(id).await?.ok_or(StoreError::NotFound(id))
    }

    /// 删除不存在的 id 不算错误
    pub async fn delete_word(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM words WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!("--- 删除的单词不存在: ID={}", id);
        } else {
            tracing::info!("<<< 单词 ID={} 已删除", id);
        }
        Ok(())
    }

    /// jp 重复时（批量导入可能产生）返回 id 最小的一条
    pub async fn find_by_jp(&self, jp: &str) -> Result<Option<Word>, StoreError> {
        let row: Option<WordRow> =
            sqlx::query_as(&format!("{SELECT_WORD} WHERE jp = ?1 ORDER BY id LIMIT 1"))
                .bind(jp)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Word::try_from).transpose()?)
    }

    /// 全部作为新记录插入，不做 jp 查重；任何一行失败则整批回滚
    pub async fn bulk_add(&self, words: &[NewWord]) -> Result<usize, StoreError> {
        let now = now_ms();
        let mut tx = self.pool.begin().await?;

        for word in words {
            let tags = encode_tags(&word.tags)?;
            if let Err(e) = sqlx::query(
                "INSERT INTO words (jp, en, tags, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            )
            .bind(&word.jp)
            .bind(&word.en)
            .bind(&tags)
            .bind(now)
            .execute(&mut *tx)
            .await
            {
                tracing::error!("!!! 批量导入失败，整批回滚: jp={:?}, Error: {}", word.jp, e);
                return Err(e.into());
            }
        }

        tx.commit().await?;
        tracing::info!("<<< 批量导入完成: {} 件", words.len());
        Ok(words.len())
    }

    pub async fn get_all_tags(&self) -> Result<Vec<String>, StoreError> {
        let words = self.get_all_words().await?;
        Ok(tag_service::collect_tags(&words))
    }
}
