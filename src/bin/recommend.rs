//! One-shot recommendation runner
//!
//! Loads the model artifact, runs a single command and prints exactly one
//! JSON document on stdout. Failures are reported as
//! `{"success": false, "error": "..."}` rather than a non-zero exit.

use aupair_match::config::Settings;
use aupair_match::models::{MessageResponse, RecommendRequest, RecommendationResponse, StatusResponse};
use aupair_match::{logging, ArtifactStore, Recommender};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use validator::Validate;

#[derive(Parser)]
#[command(name = "aupair-recommend")]
#[command(about = "Score au pairs for a household from a model artifact and print JSON.")]
struct Cli {
    /// Configuration file (defaults to config/default.toml plus AUPAIR__ environment overrides)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model artifact path, overriding `artifact.path`
    #[arg(long, global = true)]
    artifact: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the artifact and report what it contains
    Status,
    /// Run one recommendation; PARAMS is a JSON object such as
    /// {"algorithm":"hybrid","limit":10,"parent_id":1,"parent_requirements":{...}}
    Recommend {
        params: String,
    },
    /// Derive skill tags for every au pair and write the artifact back
    Materialize,
}

fn emit<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("{}", serde_json::json!({ "success": false, "error": e.to_string() })),
    }
}

fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            emit(&MessageResponse::failed(format!("Configuration error: {}", e)));
            return;
        }
    };

    logging::init(&settings.logging);

    let store = match &cli.artifact {
        Some(path) => ArtifactStore::new(path),
        None => ArtifactStore::new(&settings.artifact.path),
    };

    match cli.command {
        Command::Status => match store.load() {
            Ok(snapshot) => emit(&StatusResponse {
                success: true,
                message: "Model loaded successfully".to_string(),
                summary: snapshot.summary(),
            }),
            Err(e) => emit(&MessageResponse::failed(e)),
        },
        Command::Materialize => match store.materialize() {
            Ok(updated) => emit(&MessageResponse::ok(format!(
                "Derived skill tags for {} au pairs in {}",
                updated,
                store.path().display()
            ))),
            Err(e) => emit(&MessageResponse::failed(e)),
        },
        Command::Recommend { params } => {
            emit(&run_recommend(&store, &settings, &params));
        }
    }
}

fn run_recommend(store: &ArtifactStore, settings: &Settings, params: &str) -> RecommendationResponse {
    let snapshot = match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => return RecommendationResponse::failure(e),
    };

    let mut params: serde_json::Value = match serde_json::from_str(params) {
        Ok(params) => params,
        Err(e) => return RecommendationResponse::failure(format!("Invalid parameters: {}", e)),
    };
    if let Some(object) = params.as_object_mut() {
        object
            .entry("limit")
            .or_insert_with(|| settings.recommendation.default_limit.into());
    }

    let request: RecommendRequest = match serde_json::from_value(params) {
        Ok(request) => request,
        Err(e) => return RecommendationResponse::failure(format!("Invalid parameters: {}", e)),
    };

    if request.limit > settings.recommendation.max_limit {
        return RecommendationResponse::failure(format!(
            "limit must not exceed {}",
            settings.recommendation.max_limit
        ));
    }
    if let Err(e) = request.validate() {
        return RecommendationResponse::failure(e);
    }

    let recommender = Recommender::new(settings.scoring.weights());
    let response = RecommendationResponse::from(recommender.recommend(&snapshot, &request));
    tracing::debug!("Recommend command finished, success: {}", response.is_success());
    response
}
