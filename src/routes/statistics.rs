//! Statistics route: per-caller project and repository counts.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::services::catalog::PgCatalog;
use crate::services::statistics::{self, ScopeStrategy, StatisticsSummary};
use crate::AppState;

/// GET /api/v1/statistics — aggregate counts for the authenticated caller.
///
/// Unlike the enveloped routes, the success body here is the bare summary
/// object; consumers depend on its exact key set.
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<StatisticsSummary>, AppError> {
    let catalog = PgCatalog::new(&state.db);
    let scope = ScopeStrategy::for_caller(&user.username, user.is_admin());
    let summary = statistics::compute_statistics(&catalog, scope).await?;
    Ok(Json(summary))
}
