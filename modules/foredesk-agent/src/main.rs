use anyhow::Result;
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use foredesk_agent::{Interpreter, PromptStyle};
use foredesk_common::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Concise,
    Detailed,
}

impl From<StyleArg> for PromptStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Concise => PromptStyle::Concise,
            StyleArg::Detailed => PromptStyle::Detailed,
        }
    }
}

/// Interactive forecast-adjustment interpreter for resort operations.
#[derive(Parser)]
#[command(name = "foredesk", version)]
struct Cli {
    /// Prompt template to send upstream
    #[arg(long, value_enum, default_value = "detailed")]
    style: StyleArg,

    /// Model id override (also settable via FOREDESK_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Output token bound override (defaults to the style's budget)
    #[arg(long)]
    max_tokens: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("foredesk_agent=info".parse()?)
                .add_directive("foredesk_common=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // Missing credential: report and exit before the interpreter exists.
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("Please run: export ANTHROPIC_API_KEY='your-key-here'");
            std::process::exit(1);
        }
    };
    if let Some(model) = cli.model {
        config.model = model;
    }
    config.log_redacted();

    let mut interpreter = Interpreter::from_config(&config).with_style(cli.style.into());
    if let Some(max_tokens) = cli.max_tokens {
        interpreter = interpreter.with_max_tokens(max_tokens);
    }

    println!("Foredesk — resort operations forecast assistant");
    println!("{}", "=".repeat(60));
    println!("Chat about upcoming events and staffing.");
    println!("Examples: 'Big UFC fight this Saturday', 'Convention next Monday'");
    println!("Type 'quit' to exit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nGoodbye!");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            // EOF
            println!("Goodbye!");
            break;
        };

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }

        let result = interpreter.interpret(message, None).await;
        println!("\nAgent: {}", result.response);

        if !result.modifications.is_empty() {
            println!("\nPlanned Adjustments:");
            for modification in &result.modifications {
                println!(
                    "  - {}: {} by {}",
                    modification.metric, modification.kind, modification.value
                );
                println!("    Period: {} to {}", modification.start, modification.end);
                if let Some(window) = &modification.time_range {
                    println!("    Hours: {window}");
                }
                println!("    Reason: {}", modification.reason);
            }
        }
        println!();
    }

    info!(turns = interpreter.history().len(), "Session ended");
    Ok(())
}
