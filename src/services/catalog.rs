//! Catalog queries: project visibility, membership, and repository counts.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::project::Project;

/// Read-only query surface over project and repository storage.
///
/// The statistics aggregator depends on this trait rather than on the pool,
/// so its branching logic can be exercised without a database.
#[async_trait]
pub trait Catalog {
    /// Projects visible to every authenticated caller.
    async fn public_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Projects in which `username` holds any membership role.
    async fn member_projects(&self, username: &str) -> Result<Vec<Project>, AppError>;

    /// Count of all projects, regardless of visibility.
    async fn total_projects(&self) -> Result<i64, AppError>;

    /// Count of repositories under the given projects. An empty id set means
    /// "no projects" and yields 0, never an error.
    async fn repo_count_for(&self, project_ids: &[i64]) -> Result<i64, AppError>;

    /// Count of all repositories, regardless of project.
    async fn total_repos(&self) -> Result<i64, AppError>;
}

/// PostgreSQL-backed catalog.
#[derive(Debug, Clone)]
pub struct PgCatalog<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCatalog<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for PgCatalog<'_> {
    async fn public_projects(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE public = true ORDER BY project_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    async fn member_projects(&self, username: &str) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.*
            FROM projects p
            INNER JOIN project_members m ON m.project_id = p.project_id
            WHERE m.username = $1
            ORDER BY p.project_id
            "#,
        )
        .bind(username)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    async fn total_projects(&self) -> Result<i64, AppError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(self.pool)
            .await?;
        Ok(n)
    }

    async fn repo_count_for(&self, project_ids: &[i64]) -> Result<i64, AppError> {
        // No projects, no repositories; skip the round trip.
        if project_ids.is_empty() {
            return Ok(0);
        }
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM repositories WHERE project_id = ANY($1)",
        )
        .bind(project_ids)
        .fetch_one(self.pool)
        .await?;
        Ok(n)
    }

    async fn total_repos(&self) -> Result<i64, AppError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM repositories")
            .fetch_one(self.pool)
            .await?;
        Ok(n)
    }
}
