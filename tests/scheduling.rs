mod common;

use std::sync::Arc;

use chrono::Duration;
use common::{FailingNotifier, Harness, at, edit_session, new_session};
use tutorlink::errors::TutorError;
use tutorlink::models::schedules::entities::{ScheduleWrite, intervals_overlap};
use tutorlink::models::users::entities::UserRole;
use tutorlink::services::schedules::{
    MSG_CREATE_CONFLICT, MSG_INVALID_RANGE, MSG_SCHEDULE_NOT_FOUND, MSG_SUBSECOND_TIME,
    MSG_UPDATE_CONFLICT,
};

fn assert_no_overlaps(sessions: &[(chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>)]) {
    for (i, a) in sessions.iter().enumerate() {
        for b in sessions.iter().skip(i + 1) {
            assert!(
                !intervals_overlap(a.0, a.1, b.0, b.1),
                "sessions {a:?} and {b:?} overlap"
            );
        }
    }
}

#[tokio::test]
async fn abutting_sessions_are_allowed() {
    let h = Harness::new().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;

    h.schedules
        .upsert_schedule(new_session(teacher.id, None, at(10, 0), at(11, 0)))
        .await
        .expect("first session");
    h.schedules
        .upsert_schedule(new_session(teacher.id, None, at(11, 0), at(12, 0)))
        .await
        .expect("session starting when the previous one ends");
    h.schedules
        .upsert_schedule(new_session(teacher.id, None, at(9, 0), at(10, 0)))
        .await
        .expect("session ending when the first one starts");

    let sessions = h.schedules.get_teacher_schedule(teacher_user.id).await.unwrap();
    assert_eq!(sessions.len(), 3);
    // 按开始时间升序
    assert_eq!(sessions[0].schedule.start_time, at(9, 0));
    assert_eq!(sessions[2].schedule.start_time, at(11, 0));
}

#[tokio::test]
async fn overlapping_create_is_rejected_without_writing() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;

    h.schedules
        .upsert_schedule(new_session(teacher.id, None, at(10, 0), at(11, 0)))
        .await
        .unwrap();

    for (start, end) in [
        (at(10, 30), at(11, 30)),
        (at(9, 30), at(10, 1)),
        (at(10, 15), at(10, 45)),
        (at(9, 0), at(12, 0)),
    ] {
        let err = h
            .schedules
            .upsert_schedule(new_session(teacher.id, None, start, end))
            .await
            .expect_err("overlap must be rejected");
        assert!(matches!(err, TutorError::Conflict(_)));
        assert_eq!(err.message(), MSG_CREATE_CONFLICT);
    }

    let sessions = h.schedules.get_all_schedules().await.unwrap();
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn other_teachers_do_not_conflict() {
    let h = Harness::new().await;
    let (_, first) = h.teacher("Grace Hopper", "Math").await;
    let (_, second) = h.teacher("Alan Turing", "Logic").await;

    h.schedules
        .upsert_schedule(new_session(first.id, None, at(10, 0), at(11, 0)))
        .await
        .unwrap();
    h.schedules
        .upsert_schedule(new_session(second.id, None, at(10, 0), at(11, 0)))
        .await
        .expect("same slot for a different teacher");
}

#[tokio::test]
async fn update_excludes_the_session_itself() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;

    let created = h
        .schedules
        .upsert_schedule(new_session(teacher.id, None, at(10, 0), at(11, 0)))
        .await
        .unwrap();

    let moved = h
        .schedules
        .upsert_schedule(edit_session(
            created.schedule.id,
            teacher.id,
            at(10, 30),
            at(11, 30),
        ))
        .await
        .expect("shifting onto its own old slot is fine");

    assert_eq!(moved.schedule.id, created.schedule.id);
    assert_eq!(moved.schedule.start_time, at(10, 30));
    assert_eq!(h.schedules.get_all_schedules().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_into_another_session_is_rejected() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;

    h.schedules
        .upsert_schedule(new_session(teacher.id, None, at(10, 0), at(11, 0)))
        .await
        .unwrap();
    let later = h
        .schedules
        .upsert_schedule(new_session(teacher.id, None, at(12, 0), at(13, 0)))
        .await
        .unwrap();

    let err = h
        .schedules
        .upsert_schedule(edit_session(
            later.schedule.id,
            teacher.id,
            at(10, 30),
            at(12, 30),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.message(), MSG_UPDATE_CONFLICT);

    let sessions = h.schedules.get_all_schedules().await.unwrap();
    let unchanged = sessions
        .iter()
        .find(|s| s.schedule.id == later.schedule.id)
        .unwrap();
    assert_eq!(unchanged.schedule.start_time, at(12, 0));
}

#[tokio::test]
async fn update_keeps_the_original_student() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (_, ada) = h.student("Ada Lovelace").await;
    let (_, bob) = h.student("Bob Builder").await;

    let created = h
        .schedules
        .upsert_schedule(new_session(teacher.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();

    let updated = h
        .schedules
        .upsert_schedule(ScheduleWrite {
            student_id: Some(bob.id),
            title: Some("  Algebra review  ".to_string()),
            ..edit_session(created.schedule.id, teacher.id, at(14, 0), at(15, 0))
        })
        .await
        .unwrap();

    assert_eq!(updated.schedule.student_id, Some(ada.id));
    assert_eq!(updated.student_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(updated.schedule.title.as_deref(), Some("Algebra review"));
}

#[tokio::test]
async fn invalid_range_is_rejected() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;

    for (start, end) in [(at(11, 0), at(10, 0)), (at(10, 0), at(10, 0))] {
        let err = h
            .schedules
            .upsert_schedule(new_session(teacher.id, None, start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::Validation(_)));
        assert_eq!(err.message(), MSG_INVALID_RANGE);
    }
}

#[tokio::test]
async fn subsecond_times_are_rejected() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;

    h.schedules
        .upsert_schedule(new_session(teacher.id, None, at(10, 0), at(10, 30)))
        .await
        .unwrap();

    for (start, end) in [
        // 与上一节课实际重叠 300 毫秒
        (at(10, 30) - Duration::milliseconds(300), at(11, 0)),
        // 截断后起止相同
        (
            at(12, 0) + Duration::milliseconds(100),
            at(12, 0) + Duration::milliseconds(900),
        ),
        (at(13, 0), at(14, 0) + Duration::milliseconds(500)),
    ] {
        let err = h
            .schedules
            .upsert_schedule(new_session(teacher.id, None, start, end))
            .await
            .expect_err("sub-second bounds must be rejected");
        assert!(matches!(err, TutorError::Validation(_)));
        assert_eq!(err.message(), MSG_SUBSECOND_TIME);
    }

    let sessions = h.schedules.get_all_schedules().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].schedule.end_time, at(10, 30));
}

#[tokio::test]
async fn unknown_references_are_not_found() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;

    let err = h
        .schedules
        .upsert_schedule(new_session(9_999, None, at(10, 0), at(11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, TutorError::NotFound(_)));

    let err = h
        .schedules
        .upsert_schedule(new_session(teacher.id, Some(9_999), at(10, 0), at(11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, TutorError::NotFound(_)));

    let err = h
        .schedules
        .upsert_schedule(edit_session(9_999, teacher.id, at(10, 0), at(11, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.message(), MSG_SCHEDULE_NOT_FOUND);
}

#[tokio::test]
async fn no_overlap_holds_after_mixed_writes() {
    let h = Harness::new().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;

    let attempts = [
        (9, 0, 10, 0),
        (9, 30, 10, 30),
        (10, 0, 11, 30),
        (11, 0, 12, 0),
        (11, 30, 12, 30),
        (8, 0, 9, 15),
        (12, 30, 13, 0),
        (7, 0, 8, 0),
    ];
    for (sh, sm, eh, em) in attempts {
        let _ = h
            .schedules
            .upsert_schedule(new_session(teacher.id, None, at(sh, sm), at(eh, em)))
            .await;
    }

    let sessions: Vec<_> = h
        .schedules
        .get_teacher_schedule(teacher_user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.schedule.start_time, s.schedule.end_time))
        .collect();
    assert!(!sessions.is_empty());
    assert_no_overlaps(&sessions);
}

#[tokio::test]
async fn create_with_student_notifies_with_calendar_links() {
    let h = Harness::new().await;
    let (_, teacher) = h.teacher("Grace Hopper", "Math").await;
    let math = h.subject("Mathematics").await;
    let (_, ada) = h.student("Ada Lovelace").await;

    let detail = h
        .schedules
        .upsert_schedule(ScheduleWrite {
            subject_id: Some(math.id),
            ..new_session(teacher.id, Some(ada.id), at(10, 0), at(11, 0))
        })
        .await
        .unwrap();
    assert_eq!(detail.teacher_name, "Grace Hopper");
    assert_eq!(detail.subject_name.as_deref(), Some("Mathematics"));

    let sent = h.notifier.scheduled();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada.lovelace@example.com");
    assert_eq!(sent[0].teacher_name, "Grace Hopper");
    let calendar = sent[0].calendar.as_ref().expect("calendar links");
    assert!(calendar.google.contains("Mathematics"));

    // 更新不再通知
    h.schedules
        .upsert_schedule(edit_session(detail.schedule.id, teacher.id, at(12, 0), at(13, 0)))
        .await
        .unwrap();
    assert_eq!(h.notifier.scheduled().len(), 1);
}

#[tokio::test]
async fn create_survives_a_failing_notifier() {
    let h = Harness::with_notifier(Arc::new(FailingNotifier)).await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (_, student) = h.student("Ada Lovelace").await;

    let detail = h
        .schedules
        .upsert_schedule(new_session(teacher.id, Some(student.id), at(10, 0), at(11, 0)))
        .await
        .expect("failed delivery must not fail the write");
    assert_eq!(detail.schedule.student_id, Some(student.id));

    let sessions = h.schedules.get_teacher_schedule(teacher_user.id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].schedule.id, detail.schedule.id);
    assert_eq!(sessions[0].schedule.start_time, at(10, 0));
}

#[tokio::test]
async fn delete_is_limited_to_the_owning_teacher() {
    let h = Harness::new().await;
    let (owner_user, owner) = h.teacher("Grace Hopper", "Math").await;
    let (other_user, _) = h.teacher("Alan Turing", "Logic").await;

    let detail = h
        .schedules
        .upsert_schedule(new_session(owner.id, None, at(10, 0), at(11, 0)))
        .await
        .unwrap();

    let err = h
        .schedules
        .delete_schedule(detail.schedule.id, other_user.id)
        .await
        .unwrap_err();
    assert_eq!(err.message(), MSG_SCHEDULE_NOT_FOUND);

    h.schedules
        .delete_schedule(detail.schedule.id, owner_user.id)
        .await
        .expect("owner deletes");
    assert!(h.schedules.get_teacher_schedule(owner_user.id).await.unwrap().is_empty());

    // 删除后该时段可以重新安排
    h.schedules
        .upsert_schedule(new_session(owner.id, None, at(10, 0), at(11, 0)))
        .await
        .expect("slot is free again");
}

#[tokio::test]
async fn views_reflect_writes_after_caching() {
    let h = Harness::new().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (ada_user, ada) = h.student("Ada Lovelace").await;

    // 先把空视图放进缓存
    assert!(h.schedules.get_teacher_schedule(teacher_user.id).await.unwrap().is_empty());
    assert!(h.schedules.get_student_schedule(ada_user.id).await.unwrap().is_empty());
    assert!(h.schedules.get_all_schedules().await.unwrap().is_empty());

    h.schedules
        .upsert_schedule(new_session(teacher.id, Some(ada.id), at(10, 0), at(11, 0)))
        .await
        .unwrap();

    assert_eq!(h.schedules.get_teacher_schedule(teacher_user.id).await.unwrap().len(), 1);
    let student_view = h.schedules.get_student_schedule(ada_user.id).await.unwrap();
    assert_eq!(student_view.len(), 1);
    assert_eq!(student_view[0].teacher_name, "Grace Hopper");
    assert_eq!(h.schedules.get_all_schedules().await.unwrap().len(), 1);
}

#[tokio::test]
async fn users_without_profiles_have_empty_schedules() {
    let h = Harness::new().await;
    let admin = h.admin().await;

    assert!(h.schedules.get_teacher_schedule(admin.id).await.unwrap().is_empty());
    assert!(h.schedules.get_student_schedule(admin.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn resolve_teacher_id_follows_the_caller_role() {
    let h = Harness::new().await;
    let admin = h.admin().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;
    let (student_user, _) = h.student("Ada Lovelace").await;
    let unprofiled = h.user("New Teacher", UserRole::Teacher).await;

    assert_eq!(
        h.schedules.resolve_teacher_id(&admin, Some(teacher.id)).await.unwrap(),
        teacher.id
    );
    assert!(matches!(
        h.schedules.resolve_teacher_id(&admin, None).await,
        Err(TutorError::Validation(_))
    ));
    // 教师忽略请求中的 teacher_id
    assert_eq!(
        h.schedules.resolve_teacher_id(&teacher_user, Some(9_999)).await.unwrap(),
        teacher.id
    );
    assert!(matches!(
        h.schedules.resolve_teacher_id(&unprofiled, None).await,
        Err(TutorError::NotFound(_))
    ));
    assert!(matches!(
        h.schedules.resolve_teacher_id(&student_user, None).await,
        Err(TutorError::Authorization(_))
    ));
}

#[tokio::test]
async fn strict_mode_serializes_concurrent_writes() {
    let h = Harness::strict().await;
    let (teacher_user, teacher) = h.teacher("Grace Hopper", "Math").await;

    let writes = (0..4).map(|i| {
        let offset = i * 15;
        h.schedules.upsert_schedule(new_session(
            teacher.id,
            None,
            at(10, offset),
            at(11, offset),
        ))
    });
    let results = futures_util::future::join_all(writes).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, TutorError::Conflict(_)))
    );
    assert_eq!(h.schedules.get_teacher_schedule(teacher_user.id).await.unwrap().len(), 1);
}
