use super::*;

fn course(id: CourseId, title: &str) -> CourseSummary {
    CourseSummary {
        id,
        title: title.to_owned(),
        description: String::new(),
        instructor: None,
        start_date: None,
        end_date: None,
        is_enrolled: false,
    }
}

fn loaded(items: Vec<CourseSummary>) -> CoursesState {
    let mut state = CoursesState::default();
    let ticket = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Pending });
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Fulfilled(items) });
    state
}

#[test]
fn courses_state_defaults() {
    let s = CoursesState::default();
    assert!(s.items.is_empty());
    assert!(!s.loading);
    assert!(s.error.is_none());
    assert!(s.enrollment_error.is_none());
}

// =============================================================
// Fetch
// =============================================================

#[test]
fn fetch_fulfilled_replaces_collection() {
    let mut state = loaded(vec![course(1, "Old"), course(2, "Older")]);
    let ticket = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Pending });
    assert!(state.loading);

    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Fulfilled(vec![course(1, "Intro")]) });
    assert_eq!(state.items, vec![course(1, "Intro")]);
    assert!(!state.loading);
}

#[test]
fn fetch_rejected_keeps_collection_and_sets_error() {
    let mut state = loaded(vec![course(1, "Intro")]);
    let ticket = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Pending });
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Rejected(FETCH_FAILED.to_owned()) });

    assert_eq!(state.items, vec![course(1, "Intro")]);
    assert_eq!(state.error.as_deref(), Some(FETCH_FAILED));
    assert!(!state.loading);
}

#[test]
fn fetch_pending_clears_previous_error() {
    let mut state = CoursesState { error: Some("old".to_owned()), ..CoursesState::default() };
    let ticket = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Pending });
    assert!(state.error.is_none());
}

#[test]
fn superseded_fetch_outcome_is_dropped() {
    let mut state = CoursesState::default();
    let first = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket: first, phase: Lifecycle::Pending });
    let second = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket: second, phase: Lifecycle::Pending });

    reduce(&mut state, CoursesAction::Fetch { ticket: second, phase: Lifecycle::Fulfilled(vec![course(2, "New")]) });
    reduce(&mut state, CoursesAction::Fetch { ticket: first, phase: Lifecycle::Fulfilled(vec![course(1, "Stale")]) });

    assert_eq!(state.items, vec![course(2, "New")]);
    assert!(!state.loading);
}

// =============================================================
// Enroll / unenroll
// =============================================================

#[test]
fn enroll_marks_only_matching_course() {
    let mut state = loaded(vec![course(1, "A"), course(2, "B"), course(3, "C")]);
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Fulfilled(2)));

    let flags: Vec<bool> = state.items.iter().map(|c| c.is_enrolled).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(state.enrolled().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn enroll_unknown_course_is_noop() {
    let mut state = loaded(vec![course(1, "A")]);
    let before = state.clone();
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Fulfilled(42)));
    assert_eq!(state, before);
}

#[test]
fn enroll_twice_leaves_single_enrolled_entry() {
    let mut state = loaded(vec![course(1, "A")]);
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Fulfilled(1)));
    let after_first = state.clone();
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Fulfilled(1)));
    assert_eq!(state, after_first);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn enroll_rejection_is_separate_from_list_error() {
    let mut state = loaded(vec![course(1, "A")]);
    state.error = Some("list failed".to_owned());
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Rejected("Course is full".to_owned())));

    assert_eq!(state.enrollment_error.as_deref(), Some("Course is full"));
    assert_eq!(state.error.as_deref(), Some("list failed"));
    assert!(!state.get(1).unwrap().is_enrolled);
}

#[test]
fn enroll_pending_clears_enrollment_error_only() {
    let mut state = CoursesState {
        error: Some("list failed".to_owned()),
        enrollment_error: Some("old".to_owned()),
        ..CoursesState::default()
    };
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Pending));
    assert!(state.enrollment_error.is_none());
    assert_eq!(state.error.as_deref(), Some("list failed"));
    assert!(!state.loading);
}

#[test]
fn unenroll_clears_flag() {
    let mut state = loaded(vec![course(1, "A")]);
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Fulfilled(1)));
    reduce(&mut state, CoursesAction::Unenroll(Lifecycle::Fulfilled(1)));
    assert!(!state.get(1).unwrap().is_enrolled);
}

#[test]
fn clear_errors_resets_both_errors() {
    let mut state = CoursesState {
        error: Some("a".to_owned()),
        enrollment_error: Some("b".to_owned()),
        ..CoursesState::default()
    };
    reduce(&mut state, CoursesAction::ClearErrors);
    assert!(state.error.is_none());
    assert!(state.enrollment_error.is_none());
}

#[test]
fn reset_drops_collection_and_errors() {
    let mut state = loaded(vec![course(1, "A")]);
    reduce(&mut state, CoursesAction::Enroll(Lifecycle::Rejected("full".to_owned())));

    reduce(&mut state, CoursesAction::Reset);

    assert!(state.items.is_empty());
    assert!(state.error.is_none());
    assert!(state.enrollment_error.is_none());
    assert!(!state.loading);
}

#[test]
fn fetch_in_flight_at_reset_is_ignored() {
    let mut state = loaded(vec![course(1, "A")]);
    let ticket = state.next_ticket();
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Pending });

    reduce(&mut state, CoursesAction::Reset);
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Fulfilled(vec![course(2, "Late")]) });
    reduce(&mut state, CoursesAction::Fetch { ticket, phase: Lifecycle::Rejected("late".to_owned()) });

    assert!(state.items.is_empty());
    assert!(state.error.is_none());
    assert!(!state.loading);
}
