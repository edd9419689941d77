use async_trait::async_trait;
use flowtrack_core::flow::entity::{FlowDirection, FlowRecord};
use flowtrack_core::flow::port::FlowStore;
use flowtrack_core::store::error::StoreError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// # Summary
/// 基于内存的流水存储实现，进程退出即丢失。
///
/// 作为 `FlowStore` 的适配器，用于开发调试与测试。
pub struct MemoryFlowStore {
    buckets: Arc<RwLock<HashMap<FlowDirection, Vec<FlowRecord>>>>,
}

impl MemoryFlowStore {
    pub fn new() -> Self {
        Self {
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryFlowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlowStore for MemoryFlowStore {
    async fn append(
        &self,
        direction: FlowDirection,
        record: &FlowRecord,
    ) -> Result<(), StoreError> {
        self.buckets
            .write()
            .await
            .entry(direction)
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn scan(&self, direction: FlowDirection) -> Result<Vec<FlowRecord>, StoreError> {
        let guard = self.buckets.read().await;
        Ok(guard.get(&direction).cloned().unwrap_or_default())
    }
}
