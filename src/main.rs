use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lectern::application::ports::SessionRepository;
use lectern::application::services::{AnalysisOptions, AnalysisService, ChatService, DocumentService};
use lectern::infrastructure::llm::OpenAiClient;
use lectern::infrastructure::observability::{TracingConfig, init_tracing};
use lectern::infrastructure::persistence::InMemorySessionRepository;
use lectern::infrastructure::text_processing::CompositeFileLoader;
use lectern::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("failed to load settings")?;
    let port = settings.server.port;

    init_tracing(TracingConfig::from_settings(&settings.logging, environment), port);

    if settings.llm.api_key.is_empty() {
        tracing::warn!(
            provider = %settings.llm.provider,
            "No LLM API key configured; requests will be sent unauthenticated"
        );
    }

    let file_loader = Arc::new(CompositeFileLoader::with_default_adapters());
    let llm_client =
        Arc::new(OpenAiClient::from_settings(&settings.llm).context("failed to build LLM client")?);
    let session_repository: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());

    let analysis_options = AnalysisOptions::from(&settings.analysis);
    tracing::info!(
        base_url = %llm_client.base_url(),
        model = %settings.llm.chat_model,
        bounding = ?analysis_options.bounding,
        failure_policy = ?analysis_options.failure_policy,
        "Analysis pipeline configured"
    );

    let document_service = Arc::new(DocumentService::new(file_loader));
    let analysis_service = Arc::new(AnalysisService::new(llm_client, analysis_options));
    let chat_service = Arc::new(ChatService::new(
        document_service,
        analysis_service,
        session_repository,
    ));

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host: {}", settings.server.host))?;
    let addr = SocketAddr::new(host, port);

    let state = AppState {
        chat_service,
        settings,
    };
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
