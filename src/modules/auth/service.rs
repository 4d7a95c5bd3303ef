use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::domain::access::UserRole;
use crate::modules::users::model::User;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, first_name, last_name, email, password, role, cne)
             VALUES ($1, $2, $3, $4, $5, 'STUDENT', $6)
             RETURNING id, username, first_name, last_name, email, role, cne, matricule, created_at",
        )
        .bind(&dto.username)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.cne)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("A user with this username or email already exists");
                }
            }
            AppError::database(e)
        })?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            username: String,
            first_name: String,
            last_name: String,
            email: String,
            password: String,
            role: UserRole,
            cne: Option<String>,
            matricule: Option<String>,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, first_name, last_name, email, password, role, cne, matricule, created_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let is_valid = verify_password(&dto.password, &row.password)?;
        if !is_valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let access_token = create_access_token(row.id, &row.email, row.role, jwt_config)?;

        let user = User {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role: row.role,
            cne: row.cne,
            matricule: row.matricule,
            created_at: row.created_at,
        };

        Ok(LoginResponse { access_token, user })
    }
}
