use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admin::model::UpdateRoleDto;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequestDto,
    SessionCheckResponse, SessionUser,
};
use crate::modules::stats::model::{StatsResponse, ViewerStats};
use crate::modules::users::model::{CompanyProfileResponse, UpdateProfileDto, User, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::check_session,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::company_profile,
        crate::modules::stats::controller::get_stats,
        crate::modules::admin::controller::list_users,
        crate::modules::admin::controller::update_user_role,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            RefreshResponse,
            SessionCheckResponse,
            SessionUser,
            UpdateProfileDto,
            CompanyProfileResponse,
            StatsResponse,
            ViewerStats,
            UpdateRoleDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "First-party authentication endpoints"),
        (name = "Users", description = "Profile management for the resolved caller"),
        (name = "Stats", description = "Public platform stats"),
        (name = "Admin", description = "User administration"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
