//! Login, registration, and the demo password-reset lookup.
//!
//! One login endpoint serves all three stores; the posted role tag selects
//! which one is consulted. Registration has one endpoint per store because
//! the forms carry different fields.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::account::{AccountDraft, AccountName, Email, Role, RoleProfile};
use crate::domain::credentials::{LoginCredentials, LoginValidationError};
use crate::domain::Error;
use crate::inbound::http::error::LOGIN_REDIRECT;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{blank_to_none, see_other, ApiResult, DASHBOARD_REDIRECT};

/// Login form posted by every role's sign-in page.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    /// Role tag selecting the store (`Admin`, `Student`, or `Alumni`).
    pub role: String,
    /// Address to look up.
    pub email: String,
    /// Plaintext password; verified, never stored.
    pub password: String,
}

/// Administrator registration form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminRegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Student registration form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentRegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub student_number: String,
    pub year: String,
    pub department: String,
}

/// Alumni registration form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlumniRegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub batch: String,
    pub department: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

/// Demo password-reset lookup form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ForgotPasswordForm {
    pub role: String,
    pub email: String,
}

/// Demo password-reset lookup response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ForgotPasswordResponse {
    /// Fixed demo message; no reset token is ever issued.
    pub message: &'static str,
}

fn map_login_validation(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::UnknownRole { tag } => {
            Error::invalid_role(format!("unknown role tag: {tag}"))
        }
        other => Error::invalid_request(other.to_string()),
    }
}

fn draft_from_parts(
    name: &str,
    email: &str,
    profile: RoleProfile,
) -> Result<AccountDraft, Error> {
    let name = AccountName::new(name).map_err(|err| Error::invalid_request(err.to_string()))?;
    let email = Email::new(email).map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok(AccountDraft {
        name,
        email,
        profile,
    })
}

/// Verify credentials against the store the role tag selects and start a
/// session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginForm,
    responses(
        (status = 303, description = "Session started; redirect to the dashboard"),
        (status = 400, description = "Malformed form or unknown role tag", body = Error),
        (status = 401, description = "Credentials did not match", body = Error)
    ),
    tags = ["auth"]
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = LoginCredentials::try_from_parts(&form.role, &form.email, &form.password)
        .map_err(map_login_validation)?;
    let account = state.identity.resolve_and_verify(&credentials).await?;
    session.persist(account.id, account.role())?;
    Ok(see_other(DASHBOARD_REDIRECT))
}

/// Destroy the session and land on the login page.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session destroyed; redirect to login")),
    tags = ["auth"]
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    see_other(LOGIN_REDIRECT)
}

/// Register an administrator account.
#[utoipa::path(
    post,
    path = "/admin/register",
    request_body = AdminRegisterForm,
    responses(
        (status = 303, description = "Account created; redirect to login"),
        (status = 400, description = "Malformed form", body = Error),
        (status = 409, description = "Email already registered in this store", body = Error)
    ),
    tags = ["auth"]
)]
#[post("/admin/register")]
pub async fn register_admin(
    state: web::Data<HttpState>,
    form: web::Form<AdminRegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let draft = draft_from_parts(&form.name, &form.email, RoleProfile::Admin)?;
    state.identity.register(draft, &form.password).await?;
    Ok(see_other(LOGIN_REDIRECT))
}

/// Register a student account.
#[utoipa::path(
    post,
    path = "/student/register",
    request_body = StudentRegisterForm,
    responses(
        (status = 303, description = "Account created; redirect to login"),
        (status = 400, description = "Malformed form", body = Error),
        (status = 409, description = "Email already registered in this store", body = Error)
    ),
    tags = ["auth"]
)]
#[post("/student/register")]
pub async fn register_student(
    state: web::Data<HttpState>,
    form: web::Form<StudentRegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let profile = RoleProfile::Student {
        student_number: form.student_number,
        year: form.year,
        department: form.department,
    };
    let draft = draft_from_parts(&form.name, &form.email, profile)?;
    state.identity.register(draft, &form.password).await?;
    Ok(see_other(LOGIN_REDIRECT))
}

/// Register an alumni account.
#[utoipa::path(
    post,
    path = "/alumni/register",
    request_body = AlumniRegisterForm,
    responses(
        (status = 303, description = "Account created; redirect to login"),
        (status = 400, description = "Malformed form", body = Error),
        (status = 409, description = "Email already registered in this store", body = Error)
    ),
    tags = ["auth"]
)]
#[post("/alumni/register")]
pub async fn register_alumni(
    state: web::Data<HttpState>,
    form: web::Form<AlumniRegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let profile = RoleProfile::Alumnus {
        batch: form.batch,
        department: form.department,
        company: blank_to_none(form.company),
        designation: blank_to_none(form.designation),
        experience: Vec::new(),
    };
    let draft = draft_from_parts(&form.name, &form.email, profile)?;
    state.identity.register(draft, &form.password).await?;
    Ok(see_other(LOGIN_REDIRECT))
}

/// Demo-only password reset lookup: reports whether the address exists in
/// the selected store. No token is issued and no mail is sent.
#[utoipa::path(
    post,
    path = "/forgot-password",
    request_body = ForgotPasswordForm,
    responses(
        (status = 200, description = "Demo lookup result", body = ForgotPasswordResponse),
        (status = 400, description = "Malformed form or unknown role tag", body = Error)
    ),
    tags = ["auth"]
)]
#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    form: web::Form<ForgotPasswordForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let role = form
        .role
        .parse::<Role>()
        .map_err(|err| Error::invalid_role(err.to_string()))?;
    let email = Email::new(&form.email).map_err(|err| Error::invalid_request(err.to_string()))?;
    let message = state.identity.forgot_password_message(role, &email).await?;
    Ok(HttpResponse::Ok().json(ForgotPasswordResponse { message }))
}
