use super::entity::{FlowDirection, FlowRecord};
use crate::store::error::StoreError;
use async_trait::async_trait;

/// # Summary
/// 流水存储接口：每个方向一个只追加的分区。
///
/// # Invariants
/// - 已写入的记录不会被覆盖或删除。
/// - 实现类必须保证线程安全 (`Send` + `Sync`)。
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// # Summary
    /// 向指定方向的分区追加一条记录。
    ///
    /// # Logic
    /// 分区不存在时隐式创建。
    ///
    /// # Arguments
    /// * `direction` - 目标分区。
    /// * `record` - 已分配好 ID 的记录。
    ///
    /// # Returns
    /// * `Result<(), StoreError>`
    async fn append(&self, direction: FlowDirection, record: &FlowRecord) -> Result<(), StoreError>;

    /// # Summary
    /// 读取指定方向分区内的全部记录。
    ///
    /// # Arguments
    /// * `direction` - 目标分区。
    ///
    /// # Returns
    /// * `Result<Vec<FlowRecord>, StoreError>` - 从未写入过的分区返回空列表。
    async fn scan(&self, direction: FlowDirection) -> Result<Vec<FlowRecord>, StoreError>;
}
