//! 服务共享的依赖

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::cache::ScheduleViewCache;
use crate::services::notifications::NotificationDispatcher;
use crate::storage::Storage;

#[derive(Clone)]
pub struct ServiceContext {
    pub storage: Arc<dyn Storage>,
    pub notifications: NotificationDispatcher,
    pub schedule_views: ScheduleViewCache,
    pub guard: SchedulingGuard,
}

impl ServiceContext {
    pub fn new(
        storage: Arc<dyn Storage>,
        notifications: NotificationDispatcher,
        schedule_views: ScheduleViewCache,
        guard: SchedulingGuard,
    ) -> Self {
        Self {
            storage,
            notifications,
            schedule_views,
            guard,
        }
    }
}

/// 严格排课模式下按教师串行化写入
#[derive(Clone, Default)]
pub struct SchedulingGuard {
    strict: bool,
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl SchedulingGuard {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// 获取教师锁；非严格模式返回 None
    pub async fn lock_teacher(&self, teacher_id: i64) -> Option<OwnedMutexGuard<()>> {
        if !self.strict {
            return None;
        }
        let lock = self.locks.entry(teacher_id).or_default().clone();
        Some(lock.lock_owned().await)
    }

    /// 同时锁定两位教师，按 ID 顺序加锁避免死锁
    pub async fn lock_teachers(&self, a: i64, b: i64) -> Vec<OwnedMutexGuard<()>> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let mut guards = Vec::with_capacity(2);
        if let Some(guard) = self.lock_teacher(first).await {
            guards.push(guard);
        }
        if first != second
            && let Some(guard) = self.lock_teacher(second).await
        {
            guards.push(guard);
        }
        guards
    }
}
