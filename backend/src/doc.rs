//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, feed, jobs,
//!   profile)
//! - **Schemas**: Form and response types plus the shared error envelope
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::account::{AccountId, AccountName, Email, Experience, Role, RoleProfile};
use crate::domain::job::{Job, JobId};
use crate::domain::notification::Notification;
use crate::domain::post::{Comment, Post, PostId};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{
    AdminRegisterForm, AlumniRegisterForm, ForgotPasswordForm, ForgotPasswordResponse, LoginForm,
    StudentRegisterForm,
};
use crate::inbound::http::feed::{AccountView, CommentForm, CreatePostForm, DashboardResponse};
use crate::inbound::http::jobs::CreateJobForm;
use crate::inbound::http::profile::{ExperienceForm, ProfileUpdateForm};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CampusNet backend API",
        description = "HTTP interface for registration, the social feed, the job board, \
                       and notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::register_admin,
        crate::inbound::http::auth::register_student,
        crate::inbound::http::auth::register_alumni,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::feed::dashboard,
        crate::inbound::http::feed::create_post,
        crate::inbound::http::feed::like_post,
        crate::inbound::http::feed::add_comment,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::add_experience,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        RoleProfile,
        Experience,
        Email,
        AccountName,
        AccountId,
        Post,
        PostId,
        Comment,
        Job,
        JobId,
        Notification,
        LoginForm,
        AdminRegisterForm,
        StudentRegisterForm,
        AlumniRegisterForm,
        ForgotPasswordForm,
        ForgotPasswordResponse,
        AccountView,
        DashboardResponse,
        CreatePostForm,
        CommentForm,
        CreateJobForm,
        ProfileUpdateForm,
        ExperienceForm,
    )),
    tags(
        (name = "auth", description = "Registration, login, and session lifecycle"),
        (name = "feed", description = "Dashboard, posts, likes, and comments"),
        (name = "jobs", description = "Shared job board"),
        (name = "profile", description = "Profile updates and work history")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;
    use utoipa::OpenApi;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_registers_all_handler_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/login",
            "/logout",
            "/admin/register",
            "/student/register",
            "/alumni/register",
            "/forgot-password",
            "/dashboard",
            "/post/create",
            "/post/{id}/like",
            "/post/{id}/comment",
            "/job/create",
            "/profile/update",
            "/profile/experience",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path '{path}' in OpenAPI document"
            );
        }
    }
}
