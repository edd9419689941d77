use flowtrack_core::common::DateRange;
use flowtrack_core::common::time::TimeProvider;
use flowtrack_core::flow::entity::{EntryId, FlowDirection, FlowEntry, FlowRecord};
use flowtrack_core::flow::port::FlowStore;
use flowtrack_core::store::error::StoreError;
use std::sync::Arc;
use tracing::info;

/// # Summary
/// 流水仓储：在 `FlowStore` 之上负责 ID 分配与日期过滤。
///
/// # Invariants
/// - 存储与时钟均由外部注入，本身不持有全局状态。
/// - 每条新流水都拿到一个与写入时间无关的随机 `EntryId`，同一毫秒内的并发写入互不覆盖。
pub struct FlowRepository {
    store: Arc<dyn FlowStore>,
    clock: Arc<dyn TimeProvider>,
}

impl FlowRepository {
    pub fn new(store: Arc<dyn FlowStore>, clock: Arc<dyn TimeProvider>) -> Self {
        Self { store, clock }
    }

    /// # Summary
    /// 写入一条流水。
    ///
    /// # Logic
    /// 1. 生成新的 `EntryId`，以注入时钟的当前时间作为 `recorded_at`。
    /// 2. 追加到 `direction` 对应的分区。
    ///
    /// # Arguments
    /// * `direction` - 入库或出库。
    /// * `entry` - 已通过校验的流水。
    ///
    /// # Returns
    /// * `Result<EntryId, StoreError>` - 新记录的标识。
    pub async fn insert(
        &self,
        direction: FlowDirection,
        entry: FlowEntry,
    ) -> Result<EntryId, StoreError> {
        let record = FlowRecord {
            id: EntryId::generate(),
            recorded_at: self.clock.now(),
            entry,
        };
        self.store.append(direction, &record).await?;

        info!(
            "Recorded {} entry {} ({} x {})",
            direction, record.id, record.entry.quantity, record.entry.item
        );
        Ok(record.id)
    }

    /// # Summary
    /// 查询某方向在闭区间内的流水。
    ///
    /// # Logic
    /// 读取整个分区后按 `datetime` 过滤；分区不存在视为零条记录。
    ///
    /// # Arguments
    /// * `direction` - 入库或出库。
    /// * `range` - 含两端的日期区间。
    ///
    /// # Returns
    /// * `Result<Vec<FlowEntry>, StoreError>` - 顺序不作保证。
    pub async fn query(
        &self,
        direction: FlowDirection,
        range: &DateRange,
    ) -> Result<Vec<FlowEntry>, StoreError> {
        let records = self.store.scan(direction).await?;
        Ok(records
            .into_iter()
            .map(|r| r.entry)
            .filter(|e| range.contains(&e.datetime))
            .collect())
    }

    /// 依次读取入库与出库两个分区，返回 `(inflow, outflow)`
    pub async fn query_both(
        &self,
        range: &DateRange,
    ) -> Result<(Vec<FlowEntry>, Vec<FlowEntry>), StoreError> {
        let inflow = self.query(FlowDirection::Inbound, range).await?;
        let outflow = self.query(FlowDirection::Outbound, range).await?;
        Ok((inflow, outflow))
    }
}
