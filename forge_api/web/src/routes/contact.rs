use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing, Router,
};
use axum_extra::extract::CookieJar;
use forge_core_contact_contracts::{ContactFeatureService, ContactSubmitOutcome};
use forge_models::notification::Notification;
use forge_templates_contracts::{ContactFormView, ContactTemplate, TemplateService};
use tracing::warn;

use super::{render, render_error};
use crate::{csrf, flash, models::contact::ApiContactForm};

const CONTACT_PATH: &str = "/contact/";

#[derive(Debug)]
struct ContactState<Template, Contact> {
    template: Arc<Template>,
    contact: Arc<Contact>,
}

impl<Template, Contact> Clone for ContactState<Template, Contact> {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            contact: Arc::clone(&self.contact),
        }
    }
}

pub fn router<Template, Contact>(template: Arc<Template>, contact: Arc<Contact>) -> Router<()>
where
    Template: TemplateService,
    Contact: ContactFeatureService,
{
    Router::new()
        .route(
            CONTACT_PATH,
            routing::get(show_form::<Template, Contact>).post(submit::<Template, Contact>),
        )
        .with_state(ContactState { template, contact })
}

async fn show_form<Template, Contact>(
    State(state): State<ContactState<Template, Contact>>,
    jar: CookieJar,
) -> Response
where
    Template: TemplateService,
    Contact: ContactFeatureService,
{
    let (jar, notification) = flash::take(jar);
    let (jar, csrf_token) = csrf::ensure_token(jar);

    let template = ContactTemplate {
        notification,
        csrf_token,
        form: ContactFormView::default(),
    };

    (jar, render(&*state.template, &template)).into_response()
}

async fn submit<Template, Contact>(
    State(state): State<ContactState<Template, Contact>>,
    jar: CookieJar,
    body: Bytes,
) -> Response
where
    Template: TemplateService,
    Contact: ContactFeatureService,
{
    let form = ApiContactForm::parse(&body);

    if !csrf::verify(&jar, form.csrf_token.as_deref()) {
        warn!("rejected contact form with missing or invalid csrf token");
        return render_error(
            &*state.template,
            StatusCode::FORBIDDEN,
            "CSRF verification failed. Request aborted.",
            None,
        );
    }

    let (jar, csrf_token) = csrf::ensure_token(jar);

    let outcome = state.contact.submit(form.into()).await;
    let notification = outcome.notification();

    let form = match outcome {
        ContactSubmitOutcome::Sent => {
            let jar = flash::set(jar, Notification::ContactMessageSent);
            return (jar, Redirect::to(CONTACT_PATH)).into_response();
        }
        ContactSubmitOutcome::Invalid { form, errors } => ContactFormView::rejected(&form, &errors),
        ContactSubmitOutcome::SendFailed => ContactFormView::default(),
    };

    let template = ContactTemplate {
        notification,
        csrf_token,
        form,
    };

    (jar, render(&*state.template, &template)).into_response()
}
