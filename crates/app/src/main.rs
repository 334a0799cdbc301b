use engine::MoneyCents;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "microsave={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = engine::Engine::builder()
        .nps_rate(settings.engine.nps_rate)
        .index_rate(settings.engine.index_rate)
        .max_amount(MoneyCents::from_major(settings.engine.max_amount)?)
        .build();
    tracing::info!(
        nps_rate = engine.rates().nps,
        index_rate = engine.rates().index_fund,
        max_amount = %engine.max_amount(),
        "engine configured"
    );

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}
