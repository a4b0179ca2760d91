use crate::classifier::Classifier;
use crate::page;
use crate::predictor::assess;
use crate::prospect::ProspectInput;
use axum::{
    extract::{Form, State},
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

// ---------- Handlers ----------

async fn show_form() -> Html<String> {
    Html(page::render(&ProspectInput::default(), None))
}

async fn predict(
    State(state): State<AppState>,
    Form(input): Form<ProspectInput>,
) -> Html<String> {
    let assessment = assess(&input, state.classifier.as_ref());
    Html(page::render(&input, Some(&assessment.banner())))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
