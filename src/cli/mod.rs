//! Administrative operations invoked from the `scolarite-cli` binary.
//!
//! Staff accounts (teacher, admin, direction) are never created through the
//! API; they come from here. The old-enrollment sweep mirrors a registrar's
//! periodic cleanup of requests nobody ever decided on.

use sqlx::PgPool;

use crate::domain::access::UserRole;
use crate::utils::password::hash_password;

/// Create a user account with the given role. Fails if the username or
/// email is already taken.
#[allow(clippy::too_many_arguments)]
pub async fn create_user(
    db: &PgPool,
    username: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    role: UserRole,
    matricule: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password = hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (username, first_name, last_name, email, password, role, matricule)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT DO NOTHING",
    )
    .bind(username)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(hashed_password)
    .bind(role)
    .bind(matricule)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("A user with this username or email already exists".into());
    }

    Ok(())
}

/// Delete PENDING enrollment requests older than `days` days. Returns the
/// number of rows that would be (or were) removed. VALIDATED and REJECTED
/// rows are never touched.
pub async fn clean_pending(
    db: &PgPool,
    days: i64,
    dry_run: bool,
) -> Result<u64, Box<dyn std::error::Error>> {
    if dry_run {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments
             WHERE status = 'PENDING'
               AND created_at < NOW() - ($1 * INTERVAL '1 day')",
        )
        .bind(days)
        .fetch_one(db)
        .await?;

        return Ok(count as u64);
    }

    let result = sqlx::query(
        "DELETE FROM enrollments
         WHERE status = 'PENDING'
           AND created_at < NOW() - ($1 * INTERVAL '1 day')",
    )
    .bind(days)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}
