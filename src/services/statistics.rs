//! Per-caller statistics aggregation over the project/repository catalog.

use serde::Serialize;

use crate::errors::AppError;
use crate::services::catalog::Catalog;

/// Aggregate counts returned by `GET /api/v1/statistics`.
///
/// The `total_*` fields are only populated for admin callers and are omitted
/// from the JSON body otherwise. This shape is a frozen wire contract; for an
/// admin, `my_*` and `total_*` are identical by definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub my_project_count: i64,
    pub my_repo_count: i64,
    pub public_project_count: i64,
    pub public_repo_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_project_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_repo_count: Option<i64>,
}

/// How the "my" counts are scoped, selected once per request from the caller.
///
/// An admin's "mine" is everything, so the admin scope reads the global
/// counts and reports them under both `my_*` and `total_*`. The member scope
/// reads only projects the caller belongs to and leaves `total_*` unset.
#[derive(Debug, Clone)]
pub enum ScopeStrategy {
    Admin,
    Member(String),
}

impl ScopeStrategy {
    pub fn for_caller(username: &str, is_admin: bool) -> Self {
        if is_admin {
            ScopeStrategy::Admin
        } else {
            ScopeStrategy::Member(username.to_string())
        }
    }
}

/// Compute the statistics summary for one caller.
///
/// Issues a fixed sequence of catalog reads and fails fast on the first
/// error; no partial summary is ever returned. The reads are independent
/// queries with no cross-query snapshot, so counts may be transiently
/// inconsistent while the catalog is being mutated.
pub async fn compute_statistics<C: Catalog>(
    catalog: &C,
    scope: ScopeStrategy,
) -> Result<StatisticsSummary, AppError> {
    let public = catalog.public_projects().await?;
    let public_ids: Vec<i64> = public.iter().map(|p| p.project_id).collect();

    let public_project_count = public.len() as i64;
    let public_repo_count = catalog.repo_count_for(&public_ids).await?;

    let summary = match scope {
        ScopeStrategy::Admin => {
            let total_projects = catalog.total_projects().await?;
            let total_repos = catalog.total_repos().await?;
            StatisticsSummary {
                my_project_count: total_projects,
                my_repo_count: total_repos,
                public_project_count,
                public_repo_count,
                total_project_count: Some(total_projects),
                total_repo_count: Some(total_repos),
            }
        }
        ScopeStrategy::Member(username) => {
            let mine = catalog.member_projects(&username).await?;
            let my_ids: Vec<i64> = mine.iter().map(|p| p.project_id).collect();
            let my_repo_count = catalog.repo_count_for(&my_ids).await?;
            StatisticsSummary {
                my_project_count: mine.len() as i64,
                my_repo_count,
                public_project_count,
                public_repo_count,
                total_project_count: None,
                total_repo_count: None,
            }
        }
    };

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::models::project::Project;

    fn project(id: i64, public: bool) -> Project {
        Project {
            project_id: id,
            name: format!("project-{id}"),
            public,
            owner_username: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// In-memory catalog recording the order of queries issued.
    #[derive(Default)]
    struct MockCatalog {
        public: Vec<Project>,
        members: HashMap<String, Vec<Project>>,
        repos_per_project: HashMap<i64, i64>,
        total_projects: i64,
        total_repos: i64,
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockCatalog {
        fn record(&self, call: &'static str) -> Result<(), AppError> {
            self.calls.lock().unwrap().push(call);
            if self.fail_on == Some(call) {
                return Err(AppError::Internal(format!("{call} unavailable")));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Catalog for MockCatalog {
        async fn public_projects(&self) -> Result<Vec<Project>, AppError> {
            self.record("public_projects")?;
            Ok(self.public.clone())
        }

        async fn member_projects(&self, username: &str) -> Result<Vec<Project>, AppError> {
            self.record("member_projects")?;
            Ok(self.members.get(username).cloned().unwrap_or_default())
        }

        async fn total_projects(&self) -> Result<i64, AppError> {
            self.record("total_projects")?;
            Ok(self.total_projects)
        }

        async fn repo_count_for(&self, project_ids: &[i64]) -> Result<i64, AppError> {
            self.record("repo_count_for")?;
            Ok(project_ids
                .iter()
                .map(|id| self.repos_per_project.get(id).copied().unwrap_or(0))
                .sum())
        }

        async fn total_repos(&self) -> Result<i64, AppError> {
            self.record("total_repos")?;
            Ok(self.total_repos)
        }
    }

    #[tokio::test]
    async fn admin_sees_global_totals() {
        let catalog = MockCatalog {
            public: vec![project(1, true), project(2, true)],
            repos_per_project: HashMap::from([(1, 2), (2, 3)]),
            total_projects: 10,
            total_repos: 40,
            ..Default::default()
        };

        let summary = compute_statistics(&catalog, ScopeStrategy::Admin)
            .await
            .unwrap();

        assert_eq!(
            summary,
            StatisticsSummary {
                my_project_count: 10,
                my_repo_count: 40,
                public_project_count: 2,
                public_repo_count: 5,
                total_project_count: Some(10),
                total_repo_count: Some(40),
            }
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 6);
        assert_eq!(json["total_project_count"], 10);
        assert_eq!(json["total_repo_count"], 40);
    }

    #[tokio::test]
    async fn admin_my_counts_equal_totals() {
        let catalog = MockCatalog {
            total_projects: 3,
            total_repos: 7,
            ..Default::default()
        };

        let summary = compute_statistics(&catalog, ScopeStrategy::Admin)
            .await
            .unwrap();
        assert_eq!(Some(summary.my_project_count), summary.total_project_count);
        assert_eq!(Some(summary.my_repo_count), summary.total_repo_count);
    }

    #[tokio::test]
    async fn member_omits_totals() {
        let catalog = MockCatalog {
            members: HashMap::from([("alice".to_string(), vec![project(3, false)])]),
            repos_per_project: HashMap::from([(3, 1)]),
            total_projects: 99,
            total_repos: 99,
            ..Default::default()
        };

        let summary = compute_statistics(
            &catalog,
            ScopeStrategy::for_caller("alice", false),
        )
        .await
        .unwrap();

        assert_eq!(summary.public_project_count, 0);
        assert_eq!(summary.public_repo_count, 0);
        assert_eq!(summary.my_project_count, 1);
        assert_eq!(summary.my_repo_count, 1);
        assert_eq!(summary.total_project_count, None);
        assert_eq!(summary.total_repo_count, None);

        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(!obj.contains_key("total_project_count"));
        assert!(!obj.contains_key("total_repo_count"));
    }

    #[tokio::test]
    async fn empty_public_set_counts_zero() {
        let catalog = MockCatalog {
            total_projects: 5,
            total_repos: 12,
            ..Default::default()
        };

        let summary = compute_statistics(&catalog, ScopeStrategy::Admin)
            .await
            .unwrap();
        assert_eq!(summary.public_project_count, 0);
        assert_eq!(summary.public_repo_count, 0);
    }

    #[tokio::test]
    async fn member_with_no_projects_counts_zero() {
        let catalog = MockCatalog::default();

        let summary = compute_statistics(
            &catalog,
            ScopeStrategy::Member("bob".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(summary.my_project_count, 0);
        assert_eq!(summary.my_repo_count, 0);
    }

    #[tokio::test]
    async fn repeated_invocations_are_identical() {
        let catalog = MockCatalog {
            public: vec![project(1, true)],
            members: HashMap::from([("alice".to_string(), vec![project(2, false)])]),
            repos_per_project: HashMap::from([(1, 4), (2, 6)]),
            ..Default::default()
        };

        let scope = ScopeStrategy::for_caller("alice", false);
        let first = compute_statistics(&catalog, scope.clone()).await.unwrap();
        let second = compute_statistics(&catalog, scope).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn public_lookup_failure_stops_immediately() {
        let catalog = MockCatalog {
            fail_on: Some("public_projects"),
            ..Default::default()
        };

        let err = compute_statistics(&catalog, ScopeStrategy::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(catalog.calls(), vec!["public_projects"]);
    }

    #[tokio::test]
    async fn member_repo_count_failure_propagates() {
        let catalog = MockCatalog {
            members: HashMap::from([("alice".to_string(), vec![project(9, false)])]),
            fail_on: Some("total_repos"),
            ..Default::default()
        };

        // Member scope never touches the global repo count; only the admin
        // scope should hit the failing query.
        compute_statistics(&catalog, ScopeStrategy::Member("alice".to_string()))
            .await
            .unwrap();

        let err = compute_statistics(&catalog, ScopeStrategy::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
