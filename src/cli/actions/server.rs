use crate::{
    api::{self, state::AuthConfig},
    cli::actions::Action,
};
use anyhow::Result;

/// Handle the server action
///
/// # Errors
///
/// Returns an error if the server fails to start
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            base_url,
            session_ttl_seconds,
            token_secret,
            environment,
        } => {
            let config = AuthConfig::new(base_url, token_secret)
                .with_session_ttl_seconds(session_ttl_seconds)
                .with_environment(environment);

            api::new(port, dsn, config).await?;
        }
    }

    Ok(())
}
