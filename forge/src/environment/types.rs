use forge_core_contact_impl::ContactFeatureServiceImpl;
use forge_email_impl::EmailServiceImpl;
use forge_templates_impl::TemplateServiceImpl;

// API
pub type WebServerImpl = forge_api_web::WebServer<Template, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
