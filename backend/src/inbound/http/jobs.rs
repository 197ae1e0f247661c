//! Job board creation handler. Listings are read through the dashboard.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{see_other, ApiResult, DASHBOARD_REDIRECT};

/// Job listing form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateJobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub apply_link: String,
}

/// Create a job listing on the shared board.
#[utoipa::path(
    post,
    path = "/job/create",
    request_body = CreateJobForm,
    responses(
        (status = 303, description = "Listing created; redirect to the dashboard"),
        (status = 400, description = "Blank title or company", body = Error)
    ),
    tags = ["jobs"]
)]
#[post("/job/create")]
pub async fn create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CreateJobForm>,
) -> ApiResult<HttpResponse> {
    let (account_id, _role) = session.require_authenticated()?;
    let form = form.into_inner();
    if form.title.trim().is_empty() || form.company.trim().is_empty() {
        return Err(Error::invalid_request(
            "job title and company must not be empty",
        ));
    }
    state
        .job_board
        .post_job(
            account_id,
            form.title,
            form.company,
            form.location,
            form.description,
            form.apply_link,
        )
        .await?;
    Ok(see_other(DASHBOARD_REDIRECT))
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage for job creation.
    use super::*;
    use crate::inbound::http::auth::{login, register_alumni, AlumniRegisterForm, LoginForm};
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
            .service(register_alumni)
            .service(dashboard)
            .service(create_job)
    }

    async fn login_as_alumnus(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
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
        let login_res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form(LoginForm {
                    role: "Alumni".into(),
                    email: "grace@campus.edu".into(),
                    password: "pw-123456".into(),
                })
                .to_request(),
        )
        .await;
        login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn created_listing_appears_on_the_dashboard() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = login_as_alumnus(&app).await;

        let create = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/job/create")
                .cookie(cookie.clone())
                .set_form(CreateJobForm {
                    title: "Backend Engineer".into(),
                    company: "ACME".into(),
                    location: "Remote".into(),
                    description: "build services".into(),
                    apply_link: "https://acme.example/jobs/1".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(create.status(), StatusCode::SEE_OTHER);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        let jobs = body
            .get("jobs")
            .and_then(serde_json::Value::as_array)
            .expect("jobs array");
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].get("title").and_then(serde_json::Value::as_str),
            Some("Backend Engineer")
        );
    }

    #[actix_web::test]
    async fn unauthenticated_job_creation_redirects() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/job/create")
                .set_form(CreateJobForm {
                    title: "Backend Engineer".into(),
                    company: "ACME".into(),
                    location: "Remote".into(),
                    description: String::new(),
                    apply_link: String::new(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }
}
