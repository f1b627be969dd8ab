use fare_suggest::config::Config;
use fare_suggest::engine::Engine;
use fare_suggest::error::Error;
use fare_suggest::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let engine = Engine::new(config.pricing_table()?);

    serve(engine, config.addr).await
}
