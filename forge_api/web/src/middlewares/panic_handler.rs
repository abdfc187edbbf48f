//! Turn a panicking handler into the rendered error page.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use forge_templates_contracts::TemplateService;
use futures::FutureExt;

use crate::routes::internal_server_error;

pub fn add<S, Template>(router: Router<S>, template: Arc<Template>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Template: TemplateService,
{
    router.layer(from_fn_with_state(template, middleware::<Template>))
}

async fn middleware<Template: TemplateService>(
    State(template): State<Arc<Template>>,
    request: Request,
    next: Next,
) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => internal_server_error(
            &*template,
            anyhow!("request handler panicked: {}", panic_message(&*payload)),
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, routing, Router};
    use forge_templates_impl::TemplateServiceImpl;

    use super::*;
    use crate::{
        routes::INTERNAL_SERVER_ERROR_MESSAGE,
        tests::{send, TestRequest},
    };

    #[tokio::test]
    async fn panic_renders_error_page() {
        // Arrange
        let router = Router::new().route(
            "/",
            routing::get(|| async {
                if true {
                    panic!("handler exploded");
                }
                "unreachable"
            }),
        );
        let router = add(router, Arc::new(TemplateServiceImpl::new().unwrap()));

        // Act
        let response = send(router, TestRequest::get("/")).await;

        // Assert
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body.contains("Internal Server Error"));
        assert!(response.body.contains(INTERNAL_SERVER_ERROR_MESSAGE));
        assert!(!response.body.contains("handler exploded"));
    }

    #[test]
    fn message_of_payload() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42), "unknown panic payload");
    }
}
