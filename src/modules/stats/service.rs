use crate::identity::principal::Principal;
use crate::modules::users::model::UserRole;
use crate::store::UserStore;
use crate::utils::errors::AppError;

use super::model::{StatsResponse, ViewerStats};

pub struct StatsService;

impl StatsService {
    pub async fn overview(
        store: &dyn UserStore,
        viewer: Option<&Principal>,
    ) -> Result<StatsResponse, AppError> {
        let total_students = store.count_by_role(UserRole::Estudiante).await?;
        let total_companies = store.count_by_role(UserRole::Empresa).await?;
        let total_admins = store.count_by_role(UserRole::Admin).await?;

        Ok(StatsResponse {
            total_students,
            total_companies,
            total_admins,
            viewer: viewer.map(|principal| ViewerStats {
                role: principal.role,
                verified: principal.verified,
            }),
        })
    }
}
