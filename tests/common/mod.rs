use scolarite::domain::access::UserRole;
use scolarite::domain::enrollment::EnrollmentStatus;
use scolarite::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a test user with the given role. Username and email are
/// generated unique.
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> Uuid {
    let tag = Uuid::new_v4();
    let hashed = hash_password("testpass123").unwrap();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (username, first_name, last_name, email, password, role)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(format!("user-{tag}"))
    .bind("Test")
    .bind("User")
    .bind(format!("test-{tag}@test.com"))
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a test department, optionally managed by the given admin.
#[allow(dead_code)]
pub async fn create_test_department(pool: &PgPool, manager_id: Option<Uuid>) -> Uuid {
    let tag = Uuid::new_v4();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO departments (name, code, manager_id)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(format!("Department {tag}"))
    .bind(format!("D{}", &tag.simple().to_string()[..8]))
    .bind(manager_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a test program in a department with the given capacity.
#[allow(dead_code)]
pub async fn create_test_program(pool: &PgPool, department_id: Uuid, capacity: i32) -> Uuid {
    let tag = Uuid::new_v4();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO programs (name, code, department_id, level, capacity)
         VALUES ($1, $2, $3, 'LICENSE', $4)
         RETURNING id",
    )
    .bind(format!("Program {tag}"))
    .bind(format!("P{}", &tag.simple().to_string()[..8]))
    .bind(department_id)
    .bind(capacity)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a test course module, optionally assigned to an instructor.
#[allow(dead_code)]
pub async fn create_test_module(
    pool: &PgPool,
    program_id: Uuid,
    instructor_id: Option<Uuid>,
) -> Uuid {
    let tag = Uuid::new_v4();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO course_modules (name, code, program_id, instructor_id, semester, coefficient)
         VALUES ($1, $2, $3, $4, 1, 1.0)
         RETURNING id",
    )
    .bind(format!("Module {tag}"))
    .bind(format!("M{}", &tag.simple().to_string()[..8]))
    .bind(program_id)
    .bind(instructor_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an enrollment directly with the given status, bypassing the
/// service. Used to seed capacity and state-machine scenarios.
#[allow(dead_code)]
pub async fn create_test_enrollment(
    pool: &PgPool,
    student_id: Uuid,
    program_id: Uuid,
    academic_year: &str,
    status: EnrollmentStatus,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO enrollments (student_id, program_id, academic_year, status)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(student_id)
    .bind(program_id)
    .bind(academic_year)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}
