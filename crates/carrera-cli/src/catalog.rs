use anyhow::{Context, anyhow};
use carrera_models::catalog::parse_catalog_seed;
use carrera_models::ids::{CareerId, FacultyId};
use sqlx::{PgConnection, PgPool};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub rows: usize,
    pub faculties_created: usize,
    pub careers_created: usize,
}

pub async fn create_faculty(
    pool: &PgPool,
    name: &str,
    acronym: Option<&str>,
) -> anyhow::Result<FacultyId> {
    let name = non_blank(name, "Faculty name")?;
    let acronym = acronym.map(str::trim).filter(|a| !a.is_empty());

    sqlx::query_scalar("INSERT INTO faculties (name, acronym) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(acronym)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                anyhow!("Faculty '{name}' already exists")
            }
            _ => anyhow::Error::from(e),
        })
}

/// Creates a career under the faculty named (or identified by) `faculty`.
pub async fn create_career(pool: &PgPool, faculty: &str, name: &str) -> anyhow::Result<CareerId> {
    let name = non_blank(name, "Career name")?;
    let faculty_id = resolve_faculty(pool, faculty).await?;

    sqlx::query_scalar("INSERT INTO careers (faculty_id, name) VALUES ($1, $2) RETURNING id")
        .bind(faculty_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                anyhow!("Career '{name}' already exists in that faculty")
            }
            _ => anyhow::Error::from(e),
        })
}

/// Loads a `faculty,acronym,career` file, creating whatever is missing.
///
/// Existing faculties and careers are left as they are, so the same file can
/// be applied repeatedly.
pub async fn seed_catalog(pool: &PgPool, input: &[u8]) -> anyhow::Result<SeedReport> {
    let rows = parse_catalog_seed(input).context("Invalid catalog file")?;
    let mut report = SeedReport {
        rows: rows.len(),
        ..SeedReport::default()
    };

    let mut tx = pool.begin().await?;
    for row in &rows {
        let faculty = non_blank(&row.faculty, "Faculty name")?;
        let career = non_blank(&row.career, "Career name")?;

        let (faculty_id, created) = upsert_faculty(&mut tx, faculty, row.acronym.as_deref()).await?;
        if created {
            report.faculties_created += 1;
        }

        let inserted = sqlx::query(
            "INSERT INTO careers (faculty_id, name) VALUES ($1, $2) ON CONFLICT (faculty_id, name) DO NOTHING",
        )
        .bind(faculty_id)
        .bind(career)
        .execute(&mut *tx)
        .await?;
        report.careers_created += inserted.rows_affected() as usize;
    }
    tx.commit().await?;

    Ok(report)
}

async fn upsert_faculty(
    conn: &mut PgConnection,
    name: &str,
    acronym: Option<&str>,
) -> Result<(FacultyId, bool), sqlx::Error> {
    let inserted: Option<FacultyId> = sqlx::query_scalar(
        "INSERT INTO faculties (name, acronym) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING RETURNING id",
    )
    .bind(name)
    .bind(acronym)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(id) = inserted {
        return Ok((id, true));
    }

    let id = sqlx::query_scalar("SELECT id FROM faculties WHERE name = $1")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok((id, false))
}

async fn resolve_faculty(pool: &PgPool, faculty: &str) -> anyhow::Result<FacultyId> {
    let faculty = faculty.trim();
    let by_id = faculty.parse::<FacultyId>().ok();

    sqlx::query_scalar(
        "SELECT id FROM faculties WHERE id = $1 OR name = $2 OR acronym = $2 ORDER BY name LIMIT 1",
    )
    .bind(by_id)
    .bind(faculty)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| anyhow!("Faculty '{faculty}' not found"))
}

fn non_blank<'a>(value: &'a str, field: &str) -> anyhow::Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("{field} cannot be empty");
    }
    Ok(value)
}
