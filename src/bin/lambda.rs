//! Function entry point: DynamoDB-backed handler behind an API gateway.
//!
//! Reads `TABLE_NAME` and `UPDATE_POLICY` from the environment.

use lambda_http::Error;
use pokedex::config::ServiceConfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    pokedex::logging::init_json();

    let config = ServiceConfig::from_env()?;
    pokedex::lambda::run(config).await
}
