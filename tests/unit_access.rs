use scolarite::domain::access::{
    AccessError, UserRole, ensure_can_decide_enrollment, ensure_can_manage_catalog,
    ensure_can_record_grade, ensure_can_submit_enrollment,
};

#[test]
fn test_only_students_submit_enrollments() {
    assert!(ensure_can_submit_enrollment(UserRole::Student).is_ok());

    for role in [UserRole::Teacher, UserRole::Admin, UserRole::Direction] {
        assert_eq!(
            ensure_can_submit_enrollment(role),
            Err(AccessError::NotStudent)
        );
    }
}

#[test]
fn test_only_managing_admin_decides() {
    assert!(ensure_can_decide_enrollment(UserRole::Admin, true).is_ok());

    // An admin of some other department cannot decide.
    assert_eq!(
        ensure_can_decide_enrollment(UserRole::Admin, false),
        Err(AccessError::NotDepartmentManager)
    );
}

#[test]
fn test_direction_does_not_decide_enrollments() {
    assert_eq!(
        ensure_can_decide_enrollment(UserRole::Direction, true),
        Err(AccessError::NotDepartmentManager)
    );
    assert_eq!(
        ensure_can_decide_enrollment(UserRole::Student, true),
        Err(AccessError::NotDepartmentManager)
    );
    assert_eq!(
        ensure_can_decide_enrollment(UserRole::Teacher, true),
        Err(AccessError::NotDepartmentManager)
    );
}

#[test]
fn test_assigned_teacher_records_grades() {
    assert!(ensure_can_record_grade(UserRole::Teacher, true).is_ok());
    assert_eq!(
        ensure_can_record_grade(UserRole::Teacher, false),
        Err(AccessError::NotModuleInstructor)
    );
}

#[test]
fn test_admin_and_direction_record_any_grades() {
    assert!(ensure_can_record_grade(UserRole::Admin, false).is_ok());
    assert!(ensure_can_record_grade(UserRole::Direction, false).is_ok());
}

#[test]
fn test_students_never_record_grades() {
    assert_eq!(
        ensure_can_record_grade(UserRole::Student, true),
        Err(AccessError::NotModuleInstructor)
    );
}

#[test]
fn test_catalog_management_roles() {
    assert!(ensure_can_manage_catalog(UserRole::Admin).is_ok());
    assert!(ensure_can_manage_catalog(UserRole::Direction).is_ok());

    for role in [UserRole::Student, UserRole::Teacher] {
        assert_eq!(
            ensure_can_manage_catalog(role),
            Err(AccessError::NotCatalogManager)
        );
    }
}

#[test]
fn test_role_string_round_trips() {
    for role in [
        UserRole::Student,
        UserRole::Teacher,
        UserRole::Admin,
        UserRole::Direction,
    ] {
        assert_eq!(UserRole::parse(role.as_str()), Some(role));
    }
    assert_eq!(UserRole::parse("REGISTRAR"), None);
}
