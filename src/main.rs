use parley::assistant::Assistant;
use parley::config::ProviderConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();
    let text = args.collect::<Vec<_>>().join(" ");

    if command.is_empty() || text.is_empty() {
        eprintln!("usage: parley <translate|explain|ask> <text>");
        eprintln!("env: PARLEY_PROVIDER, PARLEY_API_KEY, PARLEY_MODEL, PARLEY_TARGET_LANG");
        std::process::exit(2);
    }

    let config = ProviderConfig::from_env();
    let assistant = Assistant::new(config);

    let result = match command.as_str() {
        "translate" => assistant.translate(&text).await,
        "explain" => assistant.explain(&text).await,
        "ask" => assistant.ask(&text, None).await,
        other => {
            eprintln!("unknown command: {other}");
            std::process::exit(2);
        }
    };

    match result {
        Ok(completion) => {
            tracing::info!(
                model = %completion.model,
                provider = %completion.provider,
                latency_ms = completion.latency_ms,
                "request completed"
            );
            println!("{}", completion.text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
