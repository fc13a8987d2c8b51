//! Feedlog CLI entry point.
//!
//! Wires settings, bootstrap and the analysis pipeline together: resolves
//! the data source (direct file or stored blob), runs the analysis, and
//! prints the JSON summary to stdout. Logs go to stderr so the JSON stream
//! stays clean for piping.

mod bootstrap;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use feedlog_core::calculations::AnalysisConfig;
use feedlog_core::settings::{LastUsedParams, Settings};
use feedlog_core::FeedlogError;
use feedlog_data::analysis::analyze_feeds;
use feedlog_runtime::blob_store::{BlobStore, FsBlobStore};
use feedlog_runtime::insights::{generate_insights, InsightContext, TemplateInsightGenerator};
use feedlog_runtime::service::AnalysisService;
use feedlog_runtime::upload::store_upload;

fn main() -> ExitCode {
    let mut settings = Settings::parse();

    if settings.clear {
        if let Err(e) = LastUsedParams::clear() {
            eprintln!("Warning: could not clear saved parameters: {e}");
        }
    } else {
        settings.apply_last_used(&LastUsedParams::load());
    }

    if let Err(e) = bootstrap::ensure_directories() {
        eprintln!("Warning: could not create config directories: {e}");
    }

    if let Err(e) = bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref()) {
        eprintln!("Warning: could not initialize logging: {e}");
    }

    match run(&settings) {
        Ok(()) => {
            if let Err(e) = settings.remember().save() {
                eprintln!("Warning: could not save parameters: {e}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> feedlog_core::Result<()> {
    info!("feedlog v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = settings
        .data_dir
        .clone()
        .or_else(bootstrap::discover_data_dir)
        .unwrap_or_else(bootstrap::default_data_dir);
    let store = FsBlobStore::new(&data_dir);

    // Upload and list are terminal actions: no analysis runs after them.
    if let Some(path) = &settings.upload {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| FeedlogError::Config(format!("not a file: {}", path.display())))?;
        store_upload(&store, &name, &content)?;
        println!("Stored {} ({} bytes)", name, content.len());
        return Ok(());
    }

    if settings.list {
        for name in store.list()? {
            println!("{name}");
        }
        return Ok(());
    }

    let config = AnalysisConfig {
        baby_weight_kg: settings.effective_weight(),
    };

    let result = match &settings.file {
        Some(path) => {
            info!("analyzing file {}", path.display());
            let raw = std::fs::read_to_string(path)?;
            analyze_feeds(&raw, &config)?
        }
        None => {
            let service = AnalysisService::new(store, config);
            service.analyze_blob(&settings.effective_blob())?.result
        }
    };

    let output = if settings.insights {
        let context = InsightContext::from_result(&result);
        let report = generate_insights(&TemplateInsightGenerator, &context);
        serde_json::json!({ "analysis": result, "insights": report })
    } else {
        serde_json::to_value(&result)?
    };

    if settings.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}
