use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Router,
};
use axum_extra::extract::CookieJar;
use forge_templates_contracts::{AboutTemplate, HomeTemplate, ProgramsTemplate, TemplateService};

use super::{render, render_error};
use crate::flash;

pub fn router(service: Arc<impl TemplateService>) -> Router<()> {
    Router::new()
        .route("/", routing::get(home))
        .route("/about/", routing::get(about))
        .route("/programs/", routing::get(programs))
        .fallback(not_found)
        .with_state(service)
}

async fn home(service: State<Arc<impl TemplateService>>, jar: CookieJar) -> Response {
    let (jar, notification) = flash::take(jar);
    (jar, render(&**service, &HomeTemplate { notification })).into_response()
}

async fn about(service: State<Arc<impl TemplateService>>, jar: CookieJar) -> Response {
    let (jar, notification) = flash::take(jar);
    (jar, render(&**service, &AboutTemplate { notification })).into_response()
}

async fn programs(service: State<Arc<impl TemplateService>>, jar: CookieJar) -> Response {
    let (jar, notification) = flash::take(jar);
    (jar, render(&**service, &ProgramsTemplate { notification })).into_response()
}

async fn not_found(service: State<Arc<impl TemplateService>>) -> Response {
    render_error(
        &**service,
        StatusCode::NOT_FOUND,
        "The page you are looking for does not exist.",
        None,
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use forge_models::notification::Notification;
    use forge_templates_contracts::{HomeTemplate, MockTemplateService};

    use crate::tests::{send, template_router, TestRequest};

    #[tokio::test]
    async fn home() {
        let response = send(template_router(), TestRequest::get("/")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("STEM FORGE AFRICA"));
        assert!(response.body.contains("Empowering Innovation Through STEM"));
        assert!(response.headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn about() {
        let response = send(template_router(), TestRequest::get("/about/")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Our Vision"));
        assert!(response.body.contains("Our Mission"));
    }

    #[tokio::test]
    async fn programs() {
        let response = send(template_router(), TestRequest::get("/programs/")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("FIRST Global Team Kenya"));
        assert!(response.body.contains("FLAGSHIP PROGRAM"));
    }

    #[tokio::test]
    async fn not_found() {
        let response = send(template_router(), TestRequest::get("/does-not-exist/")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.contains("Not Found"));
    }

    #[tokio::test]
    async fn flash_is_shown_once() {
        // Arrange
        let request = TestRequest::get("/about/").cookie("flash=contact_message_sent");

        // Act
        let response = send(template_router(), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert!(response
            .body
            .contains(Notification::ContactMessageSent.message()));
        let set_cookie = response.set_cookies();
        assert!(set_cookie.iter().any(|x| x.starts_with("flash=;")));
    }

    #[tokio::test]
    async fn render_with_template_service() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(HomeTemplate { notification: None }, "<p>home</p>".into());

        // Act
        let response = send(super::router(template.into()), TestRequest::get("/")).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "<p>home</p>");
        assert_eq!(
            response.headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
