use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 一节课的安排
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct Schedule {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// 与另一时间段是否重叠（半开区间）
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        intervals_overlap(self.start_time, self.end_time, start, end)
    }
}

/// 半开区间 `[start, end)` 重叠判断：首尾相接不算冲突
pub fn intervals_overlap<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && a_end > b_start
}

// 附带展示用名称的课程安排（日历视图使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub schedule: Schedule,
    pub teacher_name: String,
    pub student_name: Option<String>,
    pub subject_name: Option<String>,
}

// 写入存储层的课程数据；id 为空表示新建
#[derive(Debug, Clone)]
pub struct ScheduleWrite {
    pub schedule_id: Option<i64>,
    pub teacher_id: i64,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
}

impl ScheduleWrite {
    pub fn is_update(&self) -> bool {
        self.schedule_id.is_some()
    }
}

// 存储层写入结果
#[derive(Debug, Clone)]
pub enum ScheduleSaveOutcome {
    Saved(Schedule),
    /// 仅在事务内检查冲突时返回
    Conflict,
    /// 更新时找不到属于该教师的课程
    NotFound,
}

// 日程列表的范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleScope {
    Teacher(i64),
    Student(i64),
    All,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn test_abutting_intervals_do_not_overlap() {
        assert!(!intervals_overlap(at(10, 0), at(10, 30), at(10, 30), at(11, 0)));
        assert!(!intervals_overlap(at(10, 30), at(11, 0), at(10, 0), at(10, 30)));
    }

    #[test]
    fn test_partial_and_nested_overlap() {
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(10, 30), at(10, 45)));
        assert!(intervals_overlap(at(10, 30), at(10, 45), at(10, 0), at(11, 0)));
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(10, 59), at(12, 0)));
        assert!(intervals_overlap(at(10, 0), at(11, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn test_disjoint_intervals() {
        assert!(!intervals_overlap(at(8, 0), at(9, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn test_inverted_interval_never_overlaps() {
        // start >= end 的区间由调用方负责拦截，这里只记录谓词本身的行为
        assert!(!intervals_overlap(at(11, 0), at(10, 0), at(10, 0), at(11, 0)));
    }
}
