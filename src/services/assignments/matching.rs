//! 科目匹配
//!
//! 教师的可授科目是逗号分隔的自由文本。按逗号拆分、去空白、忽略空项并转小写后，
//! 学生的某个科目名（小写）只要包含任一词项即视为匹配。这是纯子串匹配，没有词边界：
//! "Art" 会匹配 "Smart History"。

use crate::models::assignments::entities::RankedStudent;
use crate::models::students::entities::StudentWithSubjects;

/// 没有任何匹配科目时的展示值
pub const NO_MATCHING_SUBJECTS: &str = "None";

pub fn teachable_tokens(teachable_subjects: &str) -> Vec<String> {
    teachable_subjects
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// 学生科目中与教师可授科目匹配的部分，保持学生科目原有顺序
pub fn matching_subjects(teachable_subjects: &str, student_subjects: &[String]) -> Vec<String> {
    let tokens = teachable_tokens(teachable_subjects);
    student_subjects
        .iter()
        .filter(|subject| {
            let subject = subject.to_lowercase();
            tokens.iter().any(|token| subject.contains(token.as_str()))
        })
        .cloned()
        .collect()
}

pub fn matching_label(matches: &[String]) -> String {
    if matches.is_empty() {
        NO_MATCHING_SUBJECTS.to_string()
    } else {
        matches.join(", ")
    }
}

pub fn annotate(teachable_subjects: &str, student: StudentWithSubjects) -> RankedStudent {
    let matches = matching_subjects(teachable_subjects, &student.subjects);
    RankedStudent {
        student: student.student,
        subjects: student.subjects,
        matching_subjects: matching_label(&matches),
        matches: !matches.is_empty(),
    }
}

/// 匹配的学生排在前面，两组内部保持原有顺序
pub fn rank_students(
    teachable_subjects: &str,
    students: Vec<StudentWithSubjects>,
) -> Vec<RankedStudent> {
    let (mut matching, others): (Vec<_>, Vec<_>) = students
        .into_iter()
        .map(|student| annotate(teachable_subjects, student))
        .partition(|ranked| ranked.matches);
    matching.extend(others);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::Student;

    fn subjects(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn student(id: i64, names: &[&str]) -> StudentWithSubjects {
        StudentWithSubjects {
            student: Student {
                id,
                user_id: id + 100,
                name: format!("Student {id}"),
                email: format!("s{id}@example.com"),
                created_at: chrono::Utc::now(),
            },
            subjects: subjects(names),
        }
    }

    #[test]
    fn test_tokens_trim_and_drop_empty() {
        assert_eq!(
            teachable_tokens(" Math, ,Physics ,, "),
            vec!["math".to_string(), "physics".to_string()]
        );
        assert!(teachable_tokens("").is_empty());
        assert!(teachable_tokens(" , ").is_empty());
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let matches = matching_subjects("Math, Physics", &subjects(&["Advanced Physics II"]));
        assert_eq!(matches, subjects(&["Advanced Physics II"]));

        let matches = matching_subjects("MATH", &subjects(&["mathematics", "Biology"]));
        assert_eq!(matches, subjects(&["mathematics"]));
    }

    #[test]
    fn test_no_word_boundary() {
        let matches = matching_subjects("Art", &subjects(&["Smart History"]));
        assert_eq!(matches, subjects(&["Smart History"]));
    }

    #[test]
    fn test_empty_teachable_matches_nothing() {
        assert!(matching_subjects("", &subjects(&["Math"])).is_empty());
        assert!(matching_subjects(" , ", &subjects(&["Math"])).is_empty());
    }

    #[test]
    fn test_matching_label() {
        assert_eq!(matching_label(&[]), "None");
        assert_eq!(
            matching_label(&subjects(&["Algebra", "Physics"])),
            "Algebra, Physics"
        );
    }

    #[test]
    fn test_rank_is_stable_partition() {
        let ranked = rank_students(
            "Physics",
            vec![
                student(1, &["History"]),
                student(2, &["Physics I"]),
                student(3, &[]),
                student(4, &["Astrophysics"]),
            ],
        );

        let ids: Vec<i64> = ranked.iter().map(|r| r.student.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
        assert!(ranked[0].matches && ranked[1].matches);
        assert_eq!(ranked[2].matching_subjects, "None");
        assert!(!ranked[3].matches);
    }
}
