use scolarite::domain::enrollment::{
    AcademicYear, EnrollmentDecision, EnrollmentError, EnrollmentStatus, MAX_PENDING_PER_STUDENT,
    check_decidable, check_decision, check_submit,
};

#[test]
fn test_submit_with_free_seat_succeeds() {
    let result = check_submit(29, 30, 0);

    assert!(result.is_ok());
}

#[test]
fn test_submit_at_capacity_fails() {
    let result = check_submit(30, 30, 0);

    assert_eq!(result, Err(EnrollmentError::CapacityFull { capacity: 30 }));
}

#[test]
fn test_submit_over_capacity_fails() {
    // Capacity may have been lowered after enrollments were accepted.
    let result = check_submit(35, 30, 0);

    assert_eq!(result, Err(EnrollmentError::CapacityFull { capacity: 30 }));
}

#[test]
fn test_submit_at_pending_limit_fails() {
    let result = check_submit(0, 30, MAX_PENDING_PER_STUDENT);

    assert_eq!(result, Err(EnrollmentError::TooManyPending));
}

#[test]
fn test_submit_under_pending_limit_succeeds() {
    let result = check_submit(0, 30, MAX_PENDING_PER_STUDENT - 1);

    assert!(result.is_ok());
}

#[test]
fn test_pending_limit_reported_before_capacity() {
    // Both limits exceeded: the student's own limit is the one reported.
    let result = check_submit(30, 30, MAX_PENDING_PER_STUDENT);

    assert_eq!(result, Err(EnrollmentError::TooManyPending));
}

#[test]
fn test_pending_enrollment_is_decidable() {
    assert!(check_decidable(EnrollmentStatus::Pending).is_ok());
}

#[test]
fn test_terminal_enrollments_are_not_decidable() {
    assert_eq!(
        check_decidable(EnrollmentStatus::Validated),
        Err(EnrollmentError::NotPending(EnrollmentStatus::Validated))
    );
    assert_eq!(
        check_decidable(EnrollmentStatus::Rejected),
        Err(EnrollmentError::NotPending(EnrollmentStatus::Rejected))
    );
}

#[test]
fn test_validate_needs_no_reason() {
    let result = check_decision(EnrollmentStatus::Pending, EnrollmentDecision::Validated, None);

    assert!(result.is_ok());
}

#[test]
fn test_reject_without_reason_fails() {
    let result = check_decision(EnrollmentStatus::Pending, EnrollmentDecision::Rejected, None);

    assert_eq!(result, Err(EnrollmentError::MissingReason));
}

#[test]
fn test_reject_with_blank_reason_fails() {
    let result = check_decision(
        EnrollmentStatus::Pending,
        EnrollmentDecision::Rejected,
        Some("   "),
    );

    assert_eq!(result, Err(EnrollmentError::MissingReason));
}

#[test]
fn test_reject_with_reason_succeeds() {
    let result = check_decision(
        EnrollmentStatus::Pending,
        EnrollmentDecision::Rejected,
        Some("Incomplete transcript"),
    );

    assert!(result.is_ok());
}

#[test]
fn test_already_decided_reported_before_missing_reason() {
    // Re-rejecting a validated enrollment without a reason: the terminal
    // state is the error that matters.
    let result = check_decision(EnrollmentStatus::Validated, EnrollmentDecision::Rejected, None);

    assert_eq!(
        result,
        Err(EnrollmentError::NotPending(EnrollmentStatus::Validated))
    );
}

#[test]
fn test_decision_maps_to_terminal_status() {
    assert_eq!(
        EnrollmentDecision::Validated.as_status(),
        EnrollmentStatus::Validated
    );
    assert_eq!(
        EnrollmentDecision::Rejected.as_status(),
        EnrollmentStatus::Rejected
    );
    assert!(EnrollmentDecision::Validated.as_status().is_terminal());
    assert!(EnrollmentDecision::Rejected.as_status().is_terminal());
}

#[test]
fn test_academic_year_parsing() {
    assert_eq!(
        "2024-2025".parse::<AcademicYear>().map(|y| y.into_string()),
        Ok("2024-2025".to_string())
    );

    for bad in ["2024-2027", "2025-2024", "2024", "24-25", "next year"] {
        assert!(bad.parse::<AcademicYear>().is_err(), "{bad:?} should fail");
    }
}
