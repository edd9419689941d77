use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowtrack_core::flow::entity::{EntryId, FlowDirection, FlowEntry, FlowRecord};
use flowtrack_core::flow::port::FlowStore;
use flowtrack_core::store::error::StoreError;
use rust_decimal::Decimal;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// 流水数据库文件名
const FLOW_DB_FILE: &str = "flows.db";

type FlowRow = (
    String,
    DateTime<Utc>,
    String,
    String,
    String,
    String,
    String,
    DateTime<Utc>,
);

/// FlowStore 的 SQLite 实现。
///
/// # Summary
/// 两个方向的流水共用一张 `flow_entries` 表，以 `bucket` 列区分分区。
///
/// # Invariants
/// * 表结构在实例创建时初始化。
/// * 金额与数量以 TEXT 保存，读取时无损还原为 `Decimal`。
/// * `seq` 自增列保留写入顺序，记录只插入不更新。
pub struct SqliteFlowStore {
    pool: SqlitePool,
}

impl SqliteFlowStore {
    /// 打开 (或创建) 数据目录下的流水数据库。
    ///
    /// # Logic
    /// 1. 确保数据目录存在。
    /// 2. 以 WAL 模式连接 `flows.db`，开启 `create_if_missing`。
    /// 3. 执行 DDL 初始化表与索引。
    ///
    /// # Arguments
    /// * `data_dir` - 数据根目录。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 目录或数据库不可用时返回 `InitError`。
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = data_dir.as_ref();
        std::fs::create_dir_all(root).map_err(|e| {
            StoreError::InitError(format!("Failed to create {}: {}", root.display(), e))
        })?;

        let options = SqliteConnectOptions::new()
            .filename(root.join(FLOW_DB_FILE))
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS flow_entries (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                bucket TEXT NOT NULL,
                datetime DATETIME NOT NULL,
                item TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                quantity TEXT NOT NULL,
                unit_amount TEXT NOT NULL,
                total_amount TEXT NOT NULL,
                recorded_at DATETIME NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_flow_entries_bucket ON flow_entries (bucket);
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        Ok(Self { pool })
    }
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw)
        .map_err(|e| StoreError::Corrupted(format!("{} = {:?}: {}", column, raw, e)))
}

fn row_to_record(row: FlowRow) -> Result<FlowRecord, StoreError> {
    let (id, datetime, item, description, quantity, unit_amount, total_amount, recorded_at) = row;
    Ok(FlowRecord {
        id: EntryId(id),
        recorded_at,
        entry: FlowEntry {
            datetime,
            item,
            description,
            quantity: parse_decimal("quantity", &quantity)?,
            unit_amount: parse_decimal("unit_amount", &unit_amount)?,
            total_amount: parse_decimal("total_amount", &total_amount)?,
        },
    })
}

#[async_trait]
impl FlowStore for SqliteFlowStore {
    /// # Summary
    /// 插入一条流水。
    ///
    /// # Logic
    /// 普通 `INSERT`；`id` 唯一约束保证不会覆盖已有记录。
    async fn append(
        &self,
        direction: FlowDirection,
        record: &FlowRecord,
    ) -> Result<(), StoreError> {
        let entry = &record.entry;
        sqlx::query(
            "INSERT INTO flow_entries \
             (id, bucket, datetime, item, description, quantity, unit_amount, total_amount, recorded_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id.0)
        .bind(direction.bucket())
        .bind(entry.datetime)
        .bind(&entry.item)
        .bind(&entry.description)
        .bind(entry.quantity.to_string())
        .bind(entry.unit_amount.to_string())
        .bind(entry.total_amount.to_string())
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!("Appended {} to bucket {}", record.id, direction.bucket());
        Ok(())
    }

    /// # Summary
    /// 按写入顺序读取整个分区。
    ///
    /// # Returns
    /// * 从未写入的分区返回空列表。
    async fn scan(&self, direction: FlowDirection) -> Result<Vec<FlowRecord>, StoreError> {
        let rows = sqlx::query_as::<_, FlowRow>(
            "SELECT id, datetime, item, description, quantity, unit_amount, total_amount, recorded_at \
             FROM flow_entries WHERE bucket = ? ORDER BY seq",
        )
        .bind(direction.bucket())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(row_to_record).collect()
    }
}
