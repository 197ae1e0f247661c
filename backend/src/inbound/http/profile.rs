//! Profile mutation handlers: partial updates and alumni experience entries.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::account::{Experience, ProfileUpdate};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{blank_to_none, see_other, ApiResult, DASHBOARD_REDIRECT};

/// Partial profile update form. Blank fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileUpdateForm {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub avatar_ref: Option<String>,
}

/// Experience entry form for alumni.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExperienceForm {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Apply a partial profile mutation to the caller's account.
#[utoipa::path(
    post,
    path = "/profile/update",
    request_body = ProfileUpdateForm,
    responses(
        (status = 303, description = "Profile updated; redirect to the dashboard"),
        (status = 404, description = "Account vanished from its store", body = crate::domain::Error)
    ),
    tags = ["profile"]
)]
#[post("/profile/update")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ProfileUpdateForm>,
) -> ApiResult<HttpResponse> {
    let (account_id, role) = session.require_authenticated()?;
    let form = form.into_inner();
    let update = ProfileUpdate {
        bio: blank_to_none(form.bio),
        company: blank_to_none(form.company),
        designation: blank_to_none(form.designation),
        avatar_ref: blank_to_none(form.avatar_ref),
    };
    state.profiles.update_profile(role, account_id, update).await?;
    Ok(see_other(DASHBOARD_REDIRECT))
}

/// Append a work-history entry to the caller's alumni profile.
#[utoipa::path(
    post,
    path = "/profile/experience",
    request_body = ExperienceForm,
    responses(
        (status = 303, description = "Entry appended; redirect to the dashboard"),
        (status = 400, description = "Caller is not an alumnus", body = crate::domain::Error)
    ),
    tags = ["profile"]
)]
#[post("/profile/experience")]
pub async fn add_experience(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ExperienceForm>,
) -> ApiResult<HttpResponse> {
    let (account_id, role) = session.require_authenticated()?;
    let form = form.into_inner();
    let experience = Experience {
        company: form.company,
        position: form.position,
        start_date: form.start_date,
        end_date: blank_to_none(form.end_date),
        description: form.description.unwrap_or_default(),
    };
    state
        .profiles
        .add_experience(role, account_id, experience)
        .await?;
    Ok(see_other(DASHBOARD_REDIRECT))
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage for profile mutations.
    use super::*;
    use crate::inbound::http::auth::{
        login, register_alumni, register_student, AlumniRegisterForm, LoginForm,
        StudentRegisterForm,
    };
    use crate::inbound::http::feed::dashboard;
    use crate::inbound::http::test_utils::{memory_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(test_session_middleware())
            .service(login)
            .service(register_student)
            .service(register_alumni)
            .service(dashboard)
            .service(update_profile)
            .service(add_experience)
    }

    async fn login_with(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        role: &str,
        email: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    role: role.into(),
                    email: email.into(),
                    password: "pw-123456".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn register_alumnus_fixture(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) {
        actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/alumni/register")
                .set_form(AlumniRegisterForm {
                    name: "Grace Hopper".into(),
                    email: "grace@campus.edu".into(),
                    password: "pw-123456".into(),
                    batch: "2015".into(),
                    department: "CS".into(),
                    company: None,
                    designation: None,
                })
                .to_request(),
        )
        .await;
    }

    #[actix_web::test]
    async fn profile_update_is_visible_on_the_next_dashboard_read() {
        let app = actix_test::init_service(test_app()).await;
        register_alumnus_fixture(&app).await;
        let cookie = login_with(&app, "Alumni", "grace@campus.edu").await;

        let update = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/profile/update")
                .cookie(cookie.clone())
                .set_form(ProfileUpdateForm {
                    bio: Some("compiler pioneer".into()),
                    company: Some("Navy".into()),
                    designation: None,
                    avatar_ref: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(update.status(), StatusCode::SEE_OTHER);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body["account"]["bio"].as_str(),
            Some("compiler pioneer"),
            "dashboard must reflect the update without a fresh login"
        );
        assert_eq!(body["account"]["company"].as_str(), Some("Navy"));
    }

    #[actix_web::test]
    async fn experience_appends_for_alumni() {
        let app = actix_test::init_service(test_app()).await;
        register_alumnus_fixture(&app).await;
        let cookie = login_with(&app, "Alumni", "grace@campus.edu").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/profile/experience")
                .cookie(cookie.clone())
                .set_form(ExperienceForm {
                    company: "Navy".into(),
                    position: "Rear Admiral".into(),
                    start_date: "1944".into(),
                    end_date: None,
                    description: Some("COBOL".into()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body["account"]["experience"][0]["company"].as_str(),
            Some("Navy")
        );
    }

    #[actix_web::test]
    async fn experience_is_rejected_for_students() {
        let app = actix_test::init_service(test_app()).await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/student/register")
                .set_form(StudentRegisterForm {
                    name: "Ada Lovelace".into(),
                    email: "ada@campus.edu".into(),
                    password: "pw-123456".into(),
                    student_number: "S-100".into(),
                    year: "3".into(),
                    department: "CS".into(),
                })
                .to_request(),
        )
        .await;
        let cookie = login_with(&app, "Student", "ada@campus.edu").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/profile/experience")
                .cookie(cookie)
                .set_form(ExperienceForm {
                    company: "ACME".into(),
                    position: "Intern".into(),
                    start_date: "2024".into(),
                    end_date: None,
                    description: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("code").and_then(serde_json::Value::as_str),
            Some("invalid_role")
        );
    }
}
