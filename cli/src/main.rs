//! CLI entrypoint for strategy-canvas
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use canvas_application::{
    GenerateCanvasInput, GenerateCanvasUseCase, GenerationParams, NoProgress, PipelineOutput,
    ProcessReplyUseCase, ProgressNotifier, SubmissionEvent, SubmissionLogger,
};
use canvas_domain::{MarkdownRenderer, Model, OutputFormat};
use canvas_infrastructure::{
    ApiKey, ConfigLoader, FileConfig, JsonlSubmissionLogger, MarkdownExporter, OpenAiConfig,
    OpenAiGateway,
};
use canvas_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, QuestionnaireForm, ReedlineSource, read_answers_file,
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting strategy-canvas");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    if cli.show_config {
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let renderer = MarkdownRenderer::new(chrono::Local::now().date_naive());
    let pipeline = ProcessReplyUseCase::new(renderer);
    let submission_logger: Option<Arc<JsonlSubmissionLogger>> = config
        .logging
        .submission_log
        .as_ref()
        .and_then(JsonlSubmissionLogger::new)
        .map(Arc::new);

    let reporter = ProgressReporter::new();
    let progress: &dyn ProgressNotifier = if cli.quiet { &NoProgress } else { &reporter };

    // === Run ===
    let output = if let Some(reply_path) = &cli.reply_file {
        let raw = std::fs::read_to_string(reply_path)
            .with_context(|| format!("Failed to read reply file {}", reply_path.display()))?;
        info!("Processing saved reply {}", reply_path.display());
        if let Some(logger) = &submission_logger {
            logger.log(SubmissionEvent::new(
                "reply_loaded",
                serde_json::json!({ "path": reply_path.display().to_string(), "reply": raw }),
            ));
        }
        pipeline.process_with_progress(&raw, progress)?
    } else {
        generate(&cli, &config, pipeline, submission_logger, progress).await?
    };

    // === Output ===
    println!("{}", ConsoleFormatter::format(&output, format));

    if cli.no_export {
        debug!("Export skipped (--no-export)");
    } else {
        let directory = cli
            .out_dir
            .clone()
            .unwrap_or_else(|| config.output.directory.clone());
        let path = MarkdownExporter::new(directory)
            .with_file_name(config.output.file_name.clone())
            .export(&output.rendered)?;
        if !cli.quiet {
            eprintln!("Saved canvas to {}", path.display());
        }
    }

    Ok(())
}

/// Collect answers, call the model and process its reply.
async fn generate(
    cli: &Cli,
    config: &FileConfig,
    pipeline: ProcessReplyUseCase,
    submission_logger: Option<Arc<JsonlSubmissionLogger>>,
    progress: &dyn ProgressNotifier,
) -> Result<PipelineOutput> {
    let Some(api_key) = ApiKey::from_env(&config.provider.api_key_env) else {
        bail!(
            "No API key found. Set {} or use --reply-file to process a saved reply.",
            config.provider.api_key_env
        );
    };

    let questionnaire = config.questionnaire.to_questionnaire();
    let answers = match &cli.answers {
        Some(path) => read_answers_file(path)?,
        None => QuestionnaireForm::new(ReedlineSource::new()).run(&questionnaire)?,
    };

    // === Dependency Injection ===
    let timeout = Duration::from_secs(config.provider.timeout_seconds);
    let gateway = OpenAiGateway::new(
        OpenAiConfig::new(&config.provider.base_url, api_key)
            .with_temperature(config.provider.temperature)
            .with_timeout(timeout),
    )?;

    let mut use_case = GenerateCanvasUseCase::new(Arc::new(gateway), pipeline);
    if let Some(logger) = submission_logger {
        use_case = use_case.with_submission_logger(logger);
    }

    let Ok(model) = config.provider.model.parse::<Model>();
    let params = GenerationParams::default()
        .with_model(model)
        .with_reply_timeout(Some(timeout));
    let input = GenerateCanvasInput::new(questionnaire, answers).with_params(params);

    Ok(use_case.execute(input, progress).await?)
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.provider.temperature = temperature;
    }
}

/// Initialize logging based on verbosity level, optionally teeing to a file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path {}", path.display()))?;
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
