//! 对象缓存
//!
//! 以字符串形式存取序列化后的对象，具体后端由 `object_cache` 提供。

pub mod object_cache;
pub mod schedule_views;

use async_trait::async_trait;

pub use schedule_views::{ScheduleView, ScheduleViewCache};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}
