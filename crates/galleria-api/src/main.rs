use galleria_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    galleria_api::setup::telemetry::init_tracing();

    let config = Config::from_env()?;

    let (_state, router) = galleria_api::setup::initialize_app(config.clone()).await?;

    galleria_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
