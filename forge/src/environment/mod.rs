use anyhow::ensure;
use forge_api_web::WebServer;
use forge_config::Config;
use forge_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use forge_templates_impl::TemplateServiceImpl;
use types::{Email, WebServerImpl};

pub mod types;

/// Wire up all services needed by the web server.
pub fn web_server(config: &Config, email: Email) -> anyhow::Result<WebServerImpl> {
    let template = TemplateServiceImpl::new()?;

    let contact = ContactFeatureServiceImpl::new(email, contact_feature_config(config)?);

    Ok(WebServer::new(template, contact))
}

fn contact_feature_config(config: &Config) -> anyhow::Result<ContactFeatureConfig> {
    ensure!(
        !config.contact.recipients.is_empty(),
        "Invalid contact config: at least one recipient is required"
    );

    Ok(ContactFeatureConfig {
        recipients: config.contact.recipients.clone().into(),
        subject_prefix: config.contact.subject_prefix.as_str().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email;

    #[tokio::test]
    async fn provide_web_server() {
        let config = forge_config::load_paths(&[] as &[&str]).unwrap();
        let email = email::connect(&config.email).unwrap();
        web_server(&config, email).unwrap();
    }

    #[test]
    fn no_recipients() {
        let mut config = forge_config::load_paths(&[] as &[&str]).unwrap();
        config.contact.recipients.clear();
        assert!(contact_feature_config(&config).is_err());
    }
}
