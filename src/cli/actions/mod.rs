pub mod server;

use crate::api::state::Environment;
use secrecy::SecretString;

/// Actions the CLI can dispatch.
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        base_url: String,
        session_ttl_seconds: i64,
        token_secret: SecretString,
        environment: Environment,
    },
}
