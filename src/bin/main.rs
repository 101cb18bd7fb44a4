use reasoning_agent::{Agent, AgentConfig, HttpChatClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries answers only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AgentConfig::from_env()?;

    info!(
        api_base = %config.api_base,
        model = %config.model,
        timeout_secs = config.timeout.as_secs(),
        "Reasoning agent starting"
    );

    let transport = HttpChatClient::new(&config)?;
    let agent = Agent::new(Box::new(transport), config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let questions = if args.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut questions = Vec::new();
        while let Some(line) = lines.next_line().await? {
            if !line.trim().is_empty() {
                questions.push(line);
            }
        }
        questions
    } else {
        vec![args.join(" ")]
    };

    let mut failures = 0;

    for question in &questions {
        let (ok, answer) = agent.answer(question).await;
        if ok {
            println!("{}", answer);
        } else {
            failures += 1;
            eprintln!("error: {}", answer);
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} question(s) failed", failures, questions.len()).into());
    }

    Ok(())
}
