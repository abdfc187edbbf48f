use forge_config::Config;
use forge_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    if let Err(err) = email.ping().await {
        warn!("Smtp server is not reachable, contact messages will fail until it is: {err:#}");
    }

    let server = environment::web_server(&config, email)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
