//! Json variant of the contact form for script driven clients.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use forge_core_contact_contracts::{ContactFeatureService, ContactSubmitOutcome};
use tracing::debug;

use crate::models::contact::{ApiContactError, ApiContactRequest, ApiContactSent};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    request: Result<Json<ApiContactRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            debug!("rejected contact request body: {rejection}");
            let error = ApiContactError {
                error: "Invalid form data",
                details: Some(BTreeMap::from([("body", vec![rejection.body_text()])])),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match service.submit(request.into()).await {
        ContactSubmitOutcome::Sent => Json(ApiContactSent {
            message: "Email sent successfully",
        })
        .into_response(),
        ContactSubmitOutcome::Invalid { errors, .. } => (
            StatusCode::BAD_REQUEST,
            Json(ApiContactError::invalid(&errors)),
        )
            .into_response(),
        ContactSubmitOutcome::SendFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiContactError {
                error: "Failed to send email. Please try again later.",
                details: None,
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use forge_core_contact_contracts::{ContactSubmitOutcome, MockContactFeatureService};
    use forge_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
    use forge_email_contracts::{ContentType, Email, MockEmailService};
    use forge_models::contact::ContactForm;
    use serde_json::{json, Value};

    use crate::tests::{router, send, template_router, TestRequest};

    fn john_doe() -> Value {
        json!({
            "name": "John Doe",
            "email": "john@example.com",
            "subject": "Test",
            "message": "Hi",
        })
    }

    fn contact_service(email: MockEmailService) -> ContactFeatureServiceImpl<MockEmailService> {
        ContactFeatureServiceImpl::new(
            email,
            ContactFeatureConfig {
                recipients: vec!["info@example.org".parse().unwrap()].into(),
                subject_prefix: "Contact Form: ".into(),
            },
        )
    }

    fn expected_email() -> Email {
        Email {
            recipients: vec!["info@example.org".parse().unwrap()],
            subject: "Contact Form: Test".into(),
            body: "From: John Doe <john@example.com>\n\nHi".into(),
            content_type: ContentType::Text,
            reply_to: Some("john@example.com".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn sent() {
        // Arrange
        let email = MockEmailService::new().with_send(expected_email(), true);
        let request = TestRequest::json("/api/contact", john_doe());

        // Act
        let response = send(router(contact_service(email)), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json(), json!({"message": "Email sent successfully"}));
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let mut body = john_doe();
        body["email"] = "invalid-email".into();
        body["name"] = Value::Null;
        let request = TestRequest::json("/api/contact", body);

        // Act
        let response = send(router(contact_service(MockEmailService::new())), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json(),
            json!({
                "error": "Invalid form data",
                "details": {
                    "name": ["This field is required."],
                    "email": ["Enter a valid email address."],
                },
            })
        );
    }

    #[tokio::test]
    async fn send_failed() {
        // Arrange
        let email = MockEmailService::new().with_send_error(expected_email(), "connection refused");
        let request = TestRequest::json("/api/contact", john_doe());

        // Act
        let response = send(router(contact_service(email)), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json(),
            json!({"error": "Failed to send email. Please try again later."})
        );
    }

    #[tokio::test]
    async fn forwards_form_to_service() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            ContactForm {
                name: Some("John Doe".into()),
                email: Some("john@example.com".into()),
                subject: Some("Test".into()),
                message: Some("Hi".into()),
            },
            ContactSubmitOutcome::Sent,
        );

        // Act
        let response = send(router(contact), TestRequest::json("/api/contact", john_doe())).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body() {
        // Arrange
        let request = TestRequest::post("/api/contact", &[("name", "John Doe")]);

        // Act
        let response = send(template_router(), request).await;

        // Assert
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let json = response.json();
        assert_eq!(json["error"], "Invalid form data");
        assert!(json["details"]["body"][0].is_string());
    }
}
