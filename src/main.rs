use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contrarian::adapters::ai::{OpenAIConfig, OpenAIProvider};
use contrarian::adapters::http::{build_router, DisagreementAppState};
use contrarian::application::RunDisagreementHandler;
use contrarian::config::{AiConfig, AppConfig, ServerConfig};
use contrarian::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let provider = build_provider(&config.ai)?;
    let handler = RunDisagreementHandler::new(provider)
        .with_max_tokens(config.ai.max_tokens)
        .with_live_timeout(config.live_timeout());
    info!(mode = handler.mode_label(), "Disagreement pipeline ready");

    let app = build_router(DisagreementAppState::new(handler), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting Contrarian server on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// OpenAI when a key is configured, otherwise mock mode.
fn build_provider(ai: &AiConfig) -> Result<Option<Arc<dyn AIProvider>>, Box<dyn std::error::Error>> {
    let Some(api_key) = ai.openai_api_key.as_deref().filter(|_| ai.has_openai()) else {
        info!("No OpenAI API key configured, running in mock mode");
        return Ok(None);
    };

    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(&ai.model)
            .with_base_url(&ai.base_url)
            .with_timeout(ai.timeout())
            .with_max_retries(ai.max_retries),
    )?;
    info!(model = %ai.model, "Using OpenAI for counterarguments");

    Ok(Some(Arc::new(provider)))
}
