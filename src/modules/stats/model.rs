use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::users::model::UserRole;

/// Public platform stats, with a viewer block when the caller is known.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_students: i64,
    pub total_companies: i64,
    pub total_admins: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerStats>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ViewerStats {
    pub role: UserRole,
    pub verified: bool,
}
