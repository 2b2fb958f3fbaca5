mod common;

use std::sync::Arc;

use common::{FailingNotifier, Harness, at, new_session};
use tutorlink::errors::TutorError;
use tutorlink::services::assignments::reassign::MSG_DOUBLE_BOOK;
use tutorlink::services::assignments::{MSG_STUDENTS_REQUIRED, MSG_TEACHER_REQUIRED};

#[tokio::test]
async fn assignment_is_idempotent() {
    let h = Harness::new().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    let first = h
        .assignments
        .assign_students(Some(teacher.id), &[ada.id])
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(first.count, 1);

    let second = h
        .assignments
        .assign_students(Some(teacher.id), &[ada.id, ada.id])
        .await
        .unwrap();
    assert_eq!(second.count, 0);

    let roster = h.assignments.get_teacher_students(teacher_user.id).await.unwrap();
    assert_eq!(roster.students.len(), 1);
    assert_eq!(roster.students[0].student.id, ada.id);
}

#[tokio::test]
async fn assignment_notifies_teacher_and_students() {
    let h = Harness::new().await;
    let physics = h.subject("Advanced Physics II").await;
    let art = h.subject("Art").await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math, Physics").await;
    let (_, ada) = h.student_taking("Ada Lovelace", &[&physics]).await;
    let (_, bob) = h.student_taking("Bob Builder", &[&art]).await;

    let result = h
        .assignments
        .assign_students(Some(teacher.id), &[ada.id, bob.id, 9_999])
        .await
        .unwrap();
    assert_eq!(result.count, 2);

    let teacher_mail = h.notifier.teachers();
    assert_eq!(teacher_mail.len(), 1);
    assert_eq!(teacher_mail[0].to, "grace.hopper@example.com");
    assert_eq!(teacher_mail[0].student_names.len(), 2);
    assert!(!teacher_mail[0].reassigned);

    let mut student_mail = h.notifier.students();
    student_mail.sort_by(|a, b| a.student_name.cmp(&b.student_name));
    assert_eq!(student_mail.len(), 2);
    assert_eq!(student_mail[0].matching_subjects, "Advanced Physics II");
    assert_eq!(student_mail[1].matching_subjects, "None");
}

#[tokio::test]
async fn assignment_requires_teacher_and_students() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    let err = h
        .assignments
        .assign_students(None, &[ada.id])
        .await
        .unwrap_err();
    assert_eq!(err.message(), MSG_TEACHER_REQUIRED);

    let err = h
        .assignments
        .assign_students(Some(teacher.id), &[])
        .await
        .unwrap_err();
    assert_eq!(err.message(), MSG_STUDENTS_REQUIRED);

    let err = h
        .assignments
        .assign_students(Some(9_999), &[ada.id])
        .await
        .unwrap_err();
    assert!(matches!(err, TutorError::NotFound(_)));
}

#[tokio::test]
async fn unassigned_students_are_ranked_by_match() {
    let h = Harness::new().await;
    let history = h.subject("Smart History").await;
    let chemistry = h.subject("Chemistry").await;
    let physics = h.subject("Advanced Physics II").await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math, Physics, Art").await;

    let (_, chem) = h.student_taking("Carl Chem", &[&chemistry]).await;
    let (_, hist) = h.student_taking("Hana Hist", &[&history]).await;
    let (_, none) = h.student("Nora None").await;
    let (_, phys) = h.student_taking("Pia Phys", &[&physics, &chemistry]).await;
    let (_, taken) = h.student_taking("Tom Taken", &[&physics]).await;

    h.assignments
        .assign_students(Some(teacher.id), &[taken.id])
        .await
        .unwrap();

    let ranked = h
        .assignments
        .get_unassigned_students(teacher.id)
        .await
        .unwrap()
        .students;

    let ids: Vec<i64> = ranked.iter().map(|r| r.student.id).collect();
    assert!(!ids.contains(&taken.id));
    assert_eq!(ids.len(), 4);

    // 匹配的在前，组内保持原有顺序
    let first_miss = ranked.iter().position(|r| !r.matches).unwrap();
    assert!(ranked[..first_miss].iter().all(|r| r.matches));
    assert!(ranked[first_miss..].iter().all(|r| !r.matches));
    assert_eq!(first_miss, 2);

    let by_id = |id: i64| ranked.iter().find(|r| r.student.id == id).unwrap();
    // "Art" 作为子串命中 "Smart History"
    assert_eq!(by_id(hist.id).matching_subjects, "Smart History");
    assert_eq!(by_id(phys.id).matching_subjects, "Advanced Physics II");
    assert_eq!(by_id(chem.id).matching_subjects, "None");
    assert_eq!(by_id(none.id).matching_subjects, "None");
    assert!(by_id(none.id).subjects.is_empty());
}

#[tokio::test]
async fn unassign_keeps_sessions() {
    let h = Harness::new().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    h.assignments
        .assign_students(Some(teacher.id), &[ada.id])
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(teacher.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();

    h.assignments.unassign_student(teacher.id, ada.id).await.unwrap();
    assert!(
        h.assignments
            .get_teacher_students(teacher_user.id)
            .await
            .unwrap()
            .students
            .is_empty()
    );
    assert_eq!(h.schedules.get_teacher_schedule(teacher_user.id).await.unwrap().len(), 1);

    let err = h.assignments.unassign_student(teacher.id, ada.id).await.unwrap_err();
    assert!(matches!(err, TutorError::NotFound(_)));
}

#[tokio::test]
async fn reassignment_moves_students_and_sessions() {
    let h = Harness::new().await;
    let (from_user, from) = h.teacher("Grace Hopper", "Math").await;
    let (to_user, to) = h.teacher("Alan Turing", "Math, Logic").await;
    let (ada_user, ada) = h.student("Ada Lovelace").await;
    let (_, bob) = h.student("Bob Builder").await;

    h.assignments
        .assign_students(Some(from.id), &[ada.id, bob.id])
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(from.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(from.id, Some(ada.id), at(13, 0), at(14, 0)))
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(from.id, Some(bob.id), at(15, 0), at(16, 0)))
        .await
        .unwrap();
    // 预热缓存
    assert_eq!(h.schedules.get_teacher_schedule(to_user.id).await.unwrap().len(), 0);

    let result = h
        .assignments
        .reassign_students(from.id, to.id, &[ada.id])
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.count, 1);
    assert_eq!(result.moved, 1);
    assert_eq!(result.rescheduled, 2);

    let from_roster = h.assignments.get_teacher_students(from_user.id).await.unwrap();
    let to_roster = h.assignments.get_teacher_students(to_user.id).await.unwrap();
    assert_eq!(from_roster.students.len(), 1);
    assert_eq!(from_roster.students[0].student.id, bob.id);
    assert_eq!(to_roster.students.len(), 1);
    assert_eq!(to_roster.students[0].student.id, ada.id);

    // 课程数量与时间不变，只是换了教师
    let moved = h.schedules.get_teacher_schedule(to_user.id).await.unwrap();
    assert_eq!(moved.len(), 2);
    assert_eq!(moved[0].schedule.start_time, at(10, 0));
    assert_eq!(moved[1].schedule.start_time, at(13, 0));
    assert!(moved.iter().all(|s| s.teacher_name == "Alan Turing"));
    assert_eq!(h.schedules.get_teacher_schedule(from_user.id).await.unwrap().len(), 1);
    assert_eq!(h.schedules.get_student_schedule(ada_user.id).await.unwrap().len(), 2);
    assert_eq!(h.schedules.get_all_schedules().await.unwrap().len(), 3);

    let teacher_mail = h.notifier.teachers();
    let last = teacher_mail.last().unwrap();
    assert!(last.reassigned);
    assert_eq!(last.to, "alan.turing@example.com");
}

#[tokio::test]
async fn reassignment_commits_even_when_notifications_fail() {
    let h = Harness::with_notifier(Arc::new(FailingNotifier)).await;
    let (_, from) = h.teacher("Grace Hopper", "Math").await;
    let (to_user, to) = h.teacher("Alan Turing", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    h.assignments
        .assign_students(Some(from.id), &[ada.id])
        .await
        .expect("assignment succeeds despite failing mail");
    h.schedules
        .upsert_schedule(new_session(from.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .expect("scheduling succeeds despite failing mail");

    let result = h
        .assignments
        .reassign_students(from.id, to.id, &[ada.id])
        .await
        .expect("reassignment is not affected by notification failures");
    assert_eq!(result.moved, 1);

    let roster = h.assignments.get_teacher_students(to_user.id).await.unwrap();
    assert_eq!(roster.students.len(), 1);
    assert_eq!(h.schedules.get_teacher_schedule(to_user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reassignment_validates_inputs() {
    let h = Harness::new().await;
    let (_, from) = h.teacher("Grace Hopper", "Math").await;
    let (_, to) = h.teacher("Alan Turing", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    let err = h.assignments.reassign_students(from.id, to.id, &[]).await.unwrap_err();
    assert_eq!(err.message(), MSG_STUDENTS_REQUIRED);

    let err = h
        .assignments
        .reassign_students(from.id, from.id, &[ada.id])
        .await
        .unwrap_err();
    assert!(matches!(err, TutorError::Validation(_)));

    let err = h
        .assignments
        .reassign_students(9_999, to.id, &[ada.id])
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Source teacher not found");

    let err = h
        .assignments
        .reassign_students(from.id, 9_999, &[ada.id])
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Target teacher not found");

    // 学生没有分配给原教师
    let err = h
        .assignments
        .reassign_students(from.id, to.id, &[ada.id])
        .await
        .unwrap_err();
    assert!(matches!(err, TutorError::Validation(_)));
}

#[tokio::test]
async fn default_mode_allows_double_booking_on_reassignment() {
    let h = Harness::new().await;
    let (_, from) = h.teacher("Grace Hopper", "Math").await;
    let (to_user, to) = h.teacher("Alan Turing", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    h.assignments.assign_students(Some(from.id), &[ada.id]).await.unwrap();
    h.schedules
        .upsert_schedule(new_session(from.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(to.id, None, at(10, 30), at(11, 30)))
        .await
        .unwrap();

    h.assignments
        .reassign_students(from.id, to.id, &[ada.id])
        .await
        .expect("no re-check outside strict mode");
    assert_eq!(h.schedules.get_teacher_schedule(to_user.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn strict_mode_rejects_double_booking_and_rolls_back() {
    let h = Harness::strict().await;
    let (from_user, from) = h.teacher("Grace Hopper", "Math").await;
    let (to_user, to) = h.teacher("Alan Turing", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    h.assignments.assign_students(Some(from.id), &[ada.id]).await.unwrap();
    h.schedules
        .upsert_schedule(new_session(from.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(to.id, None, at(10, 30), at(11, 30)))
        .await
        .unwrap();

    let err = h
        .assignments
        .reassign_students(from.id, to.id, &[ada.id])
        .await
        .unwrap_err();
    assert!(matches!(err, TutorError::Conflict(_)));
    assert_eq!(err.message(), MSG_DOUBLE_BOOK);

    // 全部回滚
    let from_roster = h.assignments.get_teacher_students(from_user.id).await.unwrap();
    assert_eq!(from_roster.students.len(), 1);
    assert!(
        h.assignments
            .get_teacher_students(to_user.id)
            .await
            .unwrap()
            .students
            .is_empty()
    );
    assert_eq!(h.schedules.get_teacher_schedule(from_user.id).await.unwrap().len(), 1);
    assert_eq!(h.schedules.get_teacher_schedule(to_user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn strict_mode_allows_non_overlapping_reassignment() {
    let h = Harness::strict().await;
    let (_, from) = h.teacher("Grace Hopper", "Math").await;
    let (to_user, to) = h.teacher("Alan Turing", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    h.assignments.assign_students(Some(from.id), &[ada.id]).await.unwrap();
    h.schedules
        .upsert_schedule(new_session(from.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(to.id, None, at(11, 0), at(12, 0)))
        .await
        .unwrap();

    let result = h
        .assignments
        .reassign_students(from.id, to.id, &[ada.id])
        .await
        .unwrap();
    assert_eq!(result.rescheduled, 1);
    assert_eq!(h.schedules.get_teacher_schedule(to_user.id).await.unwrap().len(), 2);
}
