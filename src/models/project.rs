//! Project model: the unit of repository ownership and visibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Project row from database. Repositories hang off a project; a public
/// project is visible to every authenticated caller regardless of membership.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub project_id: i64,
    pub name: String,
    pub public: bool,
    pub owner_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_serializes_id_and_visibility() {
        let project = Project {
            project_id: 7,
            name: "library".to_string(),
            public: true,
            owner_username: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["project_id"], 7);
        assert_eq!(json["public"], true);
    }
}
