use anyhow::Context;
use forge_config::EmailConfig;
use forge_email_impl::EmailServiceImpl;

/// Create the SMTP transport
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(
        &config.smtp_url,
        config.from.clone(),
        config.timeout.map(Into::into),
    )
    .context("Failed to create SMTP transport")
}
