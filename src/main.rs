use anyhow::Result;
use kotoba_srs::api::{app_router, ApiState};
use kotoba_srs::app::App;
use kotoba_srs::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::debug!("{:?}", config);

    let app = App::new(&config).await?;
    let router = app_router(ApiState::new(app), config.cors_origin.as_deref())?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
