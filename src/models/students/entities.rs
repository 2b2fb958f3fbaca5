use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生资料（附带所属用户的姓名与邮箱）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学生及其已选科目名称，用于科目匹配
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentWithSubjects {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub subjects: Vec<String>,
}
