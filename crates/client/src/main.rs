//! `ecoaudit-report` -- print a school's audit results.
//!
//! Loads the school's audit (or pre-fills a new one from the school
//! profile), prints the derived plastic metrics and the reduction-promise
//! candidates as JSON, and optionally saves the results PDF.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                         |
//! |------------------------|----------|-------------------------|-------------------------------------|
//! | `SCHOOL_ID`            | yes      | --                      | School whose audit is reported      |
//! | `AUDIT_API_URL`        | no       | `http://localhost:5000` | Base URL of the audit API           |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                    | HTTP request timeout                |
//! | `PROMISE_MIN_COUNT`    | no       | `2`                     | Minimum promises per submission     |
//! | `RESULTS_PDF_PATH`     | no       | --                      | Where to write the results PDF      |

use ecoaudit_client::config::ClientConfig;
use ecoaudit_client::http::HttpBackend;
use ecoaudit_client::wizard::{LoadOutcome, WizardController};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecoaudit_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let school_id = std::env::var("SCHOOL_ID").unwrap_or_else(|_| {
        tracing::error!("SCHOOL_ID environment variable is required");
        std::process::exit(1);
    });

    let pdf_path = std::env::var("RESULTS_PDF_PATH").ok();

    let backend = HttpBackend::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(
        school_id = %school_id,
        api_url = %config.api_url,
        "Starting ecoaudit-report",
    );

    let mut wizard = WizardController::new(backend, school_id, config.promise_policy);

    let outcome = wizard.load_existing().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to load audit");
        std::process::exit(1);
    });
    if outcome == LoadOutcome::Prefilled {
        tracing::info!("School has no audit yet; showing an empty form");
    }

    let state = wizard.state();
    let report = serde_json::json!({
        "schoolId": state.school_id(),
        "auditId": state.audit_id(),
        "status": state.status().as_str(),
        "currentStep": state.current_step().label(),
        "results": state.form().metrics(),
        "promiseCandidates": state.promise_candidates(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode report");
            std::process::exit(1);
        }
    }

    if let Some(path) = pdf_path {
        let bytes = wizard.download_results_pdf().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to download results PDF");
            std::process::exit(1);
        });
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            tracing::error!(path = %path, error = %e, "Failed to write results PDF");
            std::process::exit(1);
        }
        tracing::info!(path = %path, bytes = bytes.len(), "Saved results PDF");
    }
}
