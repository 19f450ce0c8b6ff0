use anyhow::{Context, anyhow, bail};
use carrera_core::hash_password;
use carrera_models::ids::{CareerId, FacultyId, UserId};
use sqlx::PgPool;

/// Account data gathered from flags or prompts.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub faculty_id: Option<FacultyId>,
    pub career_id: Option<CareerId>,
}

/// Creates a user and its profile in one transaction.
///
/// Faculty and career are optional here so administrators can create accounts
/// before the catalog is seeded. A career must belong to the given faculty.
pub async fn create_user(pool: &PgPool, account: &NewAccount) -> anyhow::Result<UserId> {
    let username = account.username.trim();
    if username.len() < 3 {
        bail!("Username must be at least 3 characters");
    }
    if account.password.len() < 8 {
        bail!("Password must be at least 8 characters");
    }

    match (account.faculty_id, account.career_id) {
        (None, Some(_)) => bail!("A career requires a faculty"),
        (Some(faculty_id), Some(career_id)) => {
            let belongs: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM careers WHERE id = $1 AND faculty_id = $2)",
            )
            .bind(career_id)
            .bind(faculty_id)
            .fetch_one(pool)
            .await?;
            if !belongs {
                bail!("Career {career_id} does not belong to faculty {faculty_id}");
            }
        }
        _ => {}
    }

    let hashed = hash_password(&account.password).map_err(|e| e.error)?;
    let mut tx = pool.begin().await?;

    let user_id: UserId = sqlx::query_scalar(
        "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(account.email.trim().to_lowercase())
    .bind(&hashed)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            anyhow!("Username or email already exists")
        }
        _ => anyhow::Error::from(e),
    })?;

    sqlx::query("INSERT INTO profiles (user_id, faculty_id, career_id) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(account.faculty_id)
        .bind(account.career_id)
        .execute(&mut *tx)
        .await
        .context("Failed to create profile")?;

    tx.commit().await?;
    Ok(user_id)
}

/// Resolves a username to its id.
pub async fn find_user_id(pool: &PgPool, username: &str) -> anyhow::Result<UserId> {
    sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(username.trim())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| anyhow!("User '{}' not found", username.trim()))
}
