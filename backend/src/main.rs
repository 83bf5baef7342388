use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use code_chat_api::models::{PromptResponse, UserPromptRequest, WelcomeResponse};
use code_chat_api::services::llm::{ChatMessage, ChatRole};
use code_chat_api::{app, handlers, AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "code-chat-api", about = "LLM-backed code chat service")]
struct Cli {
    /// Path to config.toml (defaults to conventional locations)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::prompt::home, handlers::prompt::process_prompt),
    components(schemas(
        UserPromptRequest,
        PromptResponse,
        WelcomeResponse,
        ChatMessage,
        ChatRole
    )),
    tags((name = "Prompt", description = "Prompt processing endpoints"))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Fail fast: an unusable configuration (e.g. missing API key) must
    // prevent the server from ever binding.
    let config = Config::load_from(cli.config.as_deref())?;

    let _log_guard = init_logging(&config);

    tracing::info!("Starting Code Chat API");
    tracing::info!("Default model: {}", config.llm.default_model);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config));

    let router = app(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

/// Initialize tracing with the configured filter, optionally teeing to a
/// daily-rolled log file. The returned guard must live for the whole
/// process so buffered log lines are flushed.
fn init_logging(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.logging.file {
        Some(path) => {
            let path = std::path::Path::new(path);
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "code-chat-api.log".to_string());

            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();

            Some(guard)
        },
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        },
    }
}
