use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::StoreError;

/// 当前 schema 代数，保存在 `PRAGMA user_version`
pub const CURRENT_GENERATION: i64 = 2;

pub struct Migration {
    pub generation: i64,
    pub statements: &'static [&'static str],
}

/// 按代数顺序排列，打开存储时依次执行，不能跳过任何一代
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        generation: 1,
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS words (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                jp TEXT NOT NULL CHECK (length(jp) > 0),
                en TEXT NOT NULL CHECK (length(en) > 0),
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_words_jp ON words (jp)",
        ],
    },
    Migration {
        generation: 2,
        statements: &[
            "ALTER TABLE words ADD COLUMN tags TEXT",
            // 只补 tags，其他字段和时间戳保持原样
            "UPDATE words SET tags = '[]' WHERE tags IS NULL",
        ],
    },
];

pub async fn current_generation(tx: &mut Transaction<'_, Sqlite>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(&mut **tx)
        .await
}

/// 把存储升级到 `target` 代；所有步骤与 user_version 的更新在同一个事务里提交
pub async fn migrate_to(pool: &SqlitePool, target: i64) -> Result<i64, StoreError> {
    let mut tx = pool.begin().await?;
    let found = current_generation(&mut tx).await?;

    if found > target {
        return Err(StoreError::StorageUnavailable(format!(
            "store generation {found} is newer than supported generation {target}"
        )));
    }

    for migration in MIGRATIONS
        .iter()
        .filter(|m| m.generation > found && m.generation <= target)
    {
        tracing::info!(">>> 正在迁移 schema: 第 {} 代", migration.generation);
        for statement in migration.statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        let pragma = format!("PRAGMA user_version = {}", migration.generation);
        sqlx::query(&pragma).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    if found < target {
        tracing::info!("<<< schema 迁移完成: {} -> {}", found, target);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_contiguous_up_to_current() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.generation, index as i64 + 1);
        }
        assert_eq!(MIGRATIONS.last().map(|m| m.generation), Some(CURRENT_GENERATION));
    }
}
