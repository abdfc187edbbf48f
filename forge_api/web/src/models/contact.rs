use std::collections::BTreeMap;

use forge_models::contact::{ContactField, ContactForm, ContactFormErrors};
use serde::{Deserialize, Serialize};

/// The urlencoded body of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub csrf_token: Option<String>,
}

impl ApiContactForm {
    /// Read the form fields from an urlencoded body.
    ///
    /// Unknown keys are ignored and a repeated key keeps its last value, so no
    /// body is ever rejected here.
    pub fn parse(body: &[u8]) -> Self {
        url::form_urlencoded::parse(body).fold(Self::default(), |mut form, (key, value)| {
            let slot = match &*key {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "subject" => &mut form.subject,
                "message" => &mut form.message,
                "csrfmiddlewaretoken" => &mut form.csrf_token,
                _ => return form,
            };
            *slot = Some(value.into_owned());
            form
        })
    }
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

/// The json body accepted by `POST /api/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ApiContactRequest> for ContactForm {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactSent {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiContactError {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<&'static str, Vec<String>>>,
}

impl ApiContactError {
    pub fn invalid(errors: &ContactFormErrors) -> Self {
        let details = errors
            .fields()
            .map(|field: ContactField| (field.as_str(), errors.messages(field)))
            .collect();

        Self {
            error: "Invalid form data",
            details: Some(details),
        }
    }
}
