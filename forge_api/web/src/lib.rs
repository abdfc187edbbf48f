use std::{net::IpAddr, sync::Arc};

use axum::Router;
use forge_core_contact_contracts::ContactFeatureService;
use forge_templates_contracts::TemplateService;
use tokio::net::TcpListener;

mod csrf;
mod flash;
mod middlewares;
mod models;
mod routes;


#[derive(Debug, Clone)]
pub struct WebServer<Template, Contact> {
    template: Template,
    contact: Contact,
}

impl<Template, Contact> WebServer<Template, Contact>
where
    Template: TemplateService,
    Contact: ContactFeatureService,
{
    pub fn new(template: Template, contact: Contact) -> Self {
        Self { template, contact }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let template = Arc::new(self.template);
        let contact = Arc::new(self.contact);

        let router = Router::new()
            .merge(routes::pages::router(Arc::clone(&template)))
            .merge(routes::contact::router(
                Arc::clone(&template),
                Arc::clone(&contact),
            ))
            .merge(routes::api::router(contact));

        let router = middlewares::panic_handler::add(router, template);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
