use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师申请状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub enum TeacherStatus {
    Pending,  // 待审核
    Approved, // 已通过
    Rejected, // 已拒绝
}

impl<'de> Deserialize<'de> for TeacherStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的教师状态: '{s}'. 支持的状态: pending, approved, rejected"
            ))
        })
    }
}

impl std::fmt::Display for TeacherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeacherStatus::Pending => write!(f, "pending"),
            TeacherStatus::Approved => write!(f, "approved"),
            TeacherStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for TeacherStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(TeacherStatus::Pending),
            "approved" => Ok(TeacherStatus::Approved),
            "rejected" => Ok(TeacherStatus::Rejected),
            _ => Err(format!("Invalid teacher status: {s}")),
        }
    }
}

// 教师资料（附带所属用户的姓名与邮箱）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub status: TeacherStatus,
    /// 逗号分隔的可授科目，自由文本
    pub teachable_subjects: String,
    pub bio: Option<String>,
    pub hire_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
