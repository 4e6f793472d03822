//! maturity-lens - Digital operating maturity classification service
//!
//! Loads configuration, wires evidence sources, narrative generator and the
//! response cache into the classification handler, then serves the HTTP API.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use maturity_lens::adapters::cache::InMemoryResponseCache;
use maturity_lens::adapters::enrichment::{
    build_client, ListingEvidenceSource, ListingSourceConfig, SocialEvidenceSource,
    WebsiteEvidenceSource,
};
use maturity_lens::adapters::http::{build_router, ClassifyAppState, HttpSettings};
use maturity_lens::adapters::narrative::{
    AnthropicNarrativeConfig, AnthropicNarrativeGenerator, TemplateNarrativeGenerator,
};
use maturity_lens::application::{ClassifyBusinessHandler, EnrichmentOrchestrator};
use maturity_lens::config::{AppConfig, EnrichmentConfig, NarrativeProvider};
use maturity_lens::ports::{NarrativeGenerator, ResponseCache};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting maturity-lens"
    );

    let orchestrator = build_orchestrator(&config.enrichment)?;
    let narrative = build_narrative(&config)?;
    let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryResponseCache::new(config.cache.settings()));
    info!(
        max_entries = config.cache.max_entries,
        ttl_secs = config.cache.ttl_secs,
        "Response cache ready"
    );

    let handler = ClassifyBusinessHandler::new(Arc::new(orchestrator), narrative, cache.clone())
        .with_narrative_timeout(config.ai.timeout());
    let state = ClassifyAppState::new(Arc::new(handler), cache)
        .with_verbose_errors(config.features.verbose_errors);
    let app = build_router(state, &HttpSettings::from_config(&config));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

fn build_orchestrator(config: &EnrichmentConfig) -> Result<EnrichmentOrchestrator, BoxError> {
    let mut orchestrator = EnrichmentOrchestrator::new(config.deadline());
    if !config.enabled {
        info!("Evidence enrichment disabled");
        return Ok(orchestrator);
    }

    let client = build_client(config.request_timeout(), &config.user_agent)?;

    orchestrator = orchestrator
        .with_source(Arc::new(WebsiteEvidenceSource::new(client.clone())))
        .with_source(Arc::new(
            SocialEvidenceSource::new(client.clone())
                .with_profile_url_template(config.social_profile_url_template.clone()),
        ));

    match config.listing_api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            let listing = ListingSourceConfig::new(key).with_base_url(config.listing_base_url.clone());
            orchestrator = orchestrator.with_source(Arc::new(ListingEvidenceSource::new(listing, client)));
        }
        None => warn!("No listing API key configured; listing references will be ignored"),
    }

    info!(
        sources = ?orchestrator.source_kinds(),
        deadline_ms = config.deadline_ms,
        "Evidence enrichment ready"
    );
    Ok(orchestrator)
}

fn build_narrative(config: &AppConfig) -> Result<Arc<dyn NarrativeGenerator>, BoxError> {
    let generator: Arc<dyn NarrativeGenerator> = match config.ai.narrative_provider {
        NarrativeProvider::Template => Arc::new(TemplateNarrativeGenerator::new()),
        NarrativeProvider::Anthropic => {
            let key = config.ai.anthropic_api_key.clone().unwrap_or_default();
            let anthropic = AnthropicNarrativeConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout());
            Arc::new(AnthropicNarrativeGenerator::new(anthropic)?)
        }
    };
    info!(generator = generator.name(), "Narrative generator ready");
    Ok(generator)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
