use anyhow::Context;
use insurance_response_predictor::{
    classifier::Classifier,
    config::{LogFormat, Settings},
    server::{self, AppState},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "insurance_response_predictor=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(feature = "torch")]
fn load_classifier(settings: &Settings) -> anyhow::Result<Arc<dyn Classifier>> {
    use insurance_response_predictor::model::TorchClassifier;

    let mdl = TorchClassifier::load(&settings.model_path, &settings.meta_path)?;
    tracing::info!(
        model = %settings.model_path.display(),
        feat_list = ?mdl.meta().feat_list,
        "loaded model"
    );
    Ok(Arc::new(mdl))
}

#[cfg(not(feature = "torch"))]
fn load_classifier(_settings: &Settings) -> anyhow::Result<Arc<dyn Classifier>> {
    anyhow::bail!("built without the `torch` feature; no model backend is available")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    let classifier = load_classifier(&settings)
        .inspect_err(|e| tracing::error!("startup failed: {e:#}"))?;

    let app = server::router(AppState::new(classifier));

    tracing::info!("listening on {}", settings.addr);
    let listener = tokio::net::TcpListener::bind(settings.addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
