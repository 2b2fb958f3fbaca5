//! 日程视图缓存
//!
//! 教师、学生与全部日程三类列表按用户缓存，任何排课写入后由服务层失效对应键。

use std::sync::Arc;

use tracing::warn;

use super::{CacheResult, ObjectCache};
use crate::models::schedules::entities::ScheduleDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleView {
    /// 教师用户 ID
    Teacher(i64),
    /// 学生用户 ID
    Student(i64),
    All,
}

impl ScheduleView {
    pub fn cache_key(&self) -> String {
        match self {
            ScheduleView::Teacher(user_id) => format!("schedules:teacher:{user_id}"),
            ScheduleView::Student(user_id) => format!("schedules:student:{user_id}"),
            ScheduleView::All => "schedules:all".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ScheduleViewCache {
    cache: Arc<dyn ObjectCache>,
    ttl: u64,
}

impl ScheduleViewCache {
    pub fn new(cache: Arc<dyn ObjectCache>, ttl: u64) -> Self {
        Self { cache, ttl }
    }

    pub async fn get(&self, view: ScheduleView) -> Option<Vec<ScheduleDetail>> {
        let key = view.cache_key();
        match self.cache.get_raw(&key).await {
            CacheResult::Found(json) => match serde_json::from_str(&json) {
                Ok(schedules) => Some(schedules),
                Err(e) => {
                    warn!("Discarding unreadable schedule view {}: {}", key, e);
                    self.cache.remove(&key).await;
                    None
                }
            },
            CacheResult::NotFound => None,
        }
    }

    pub async fn put(&self, view: ScheduleView, schedules: &[ScheduleDetail]) {
        match serde_json::to_string(schedules) {
            Ok(json) => {
                self.cache
                    .insert_raw(view.cache_key(), json, self.ttl)
                    .await
            }
            Err(e) => warn!("Failed to serialize schedule view: {}", e),
        }
    }

    pub async fn invalidate(&self, views: &[ScheduleView]) {
        for view in views {
            self.cache.remove(&view.cache_key()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::MokaCacheWrapper;
    use crate::models::schedules::entities::Schedule;
    use chrono::{TimeZone, Utc};

    fn detail(id: i64) -> ScheduleDetail {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        ScheduleDetail {
            schedule: Schedule {
                id,
                teacher_id: 1,
                student_id: Some(2),
                subject_id: None,
                start_time: start,
                end_time: start + chrono::Duration::hours(1),
                title: Some("Algebra".to_string()),
                created_at: start,
                updated_at: start,
            },
            teacher_name: "Ada".to_string(),
            student_name: Some("Ben".to_string()),
            subject_name: None,
        }
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(ScheduleView::Teacher(7).cache_key(), "schedules:teacher:7");
        assert_eq!(ScheduleView::Student(9).cache_key(), "schedules:student:9");
        assert_eq!(ScheduleView::All.cache_key(), "schedules:all");
    }

    #[tokio::test]
    async fn test_put_get_invalidate() {
        let views = ScheduleViewCache::new(Arc::new(MokaCacheWrapper::new(100, 60)), 60);
        assert!(views.get(ScheduleView::All).await.is_none());

        views.put(ScheduleView::All, &[detail(1), detail(2)]).await;
        let cached = views.get(ScheduleView::All).await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].schedule.id, 1);
        assert_eq!(cached[0].teacher_name, "Ada");

        views
            .invalidate(&[ScheduleView::Teacher(1), ScheduleView::All])
            .await;
        assert!(views.get(ScheduleView::All).await.is_none());
    }
}
