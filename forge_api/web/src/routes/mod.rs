use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use forge_models::notification::Notification;
use forge_templates_contracts::{ErrorTemplate, Template, TemplateService};
use tracing::error;

pub mod api;
pub mod contact;
pub mod pages;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str =
    "Something went wrong on our side. Please try again later.";

/// Log the error and render the error page with status 500.
pub fn internal_server_error(
    service: &impl TemplateService,
    err: impl Into<anyhow::Error>,
) -> Response {
    let err = err.into();
    error!("internal server error: {err:#}");
    render_error(
        service,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_SERVER_ERROR_MESSAGE,
        None,
    )
}

fn render<T: Template + 'static>(service: &impl TemplateService, template: &T) -> Response {
    match service.render(template) {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_server_error(service, err),
    }
}

fn render_error(
    service: &impl TemplateService,
    status: StatusCode,
    message: &str,
    notification: Option<Notification>,
) -> Response {
    let template = ErrorTemplate {
        notification,
        title: status.canonical_reason().unwrap_or("Error").into(),
        message: message.into(),
    };

    match service.render(&template) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!("failed to render error page: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
