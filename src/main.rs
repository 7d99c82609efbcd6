//! Airline support console entry point.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use airline_support::config::SupportConfig;
use airline_support::console::{self, Input};
use airline_support::service::SupportService;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = match SupportConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: SupportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = SupportService::connect(&config).await?;
    let mut session = service.start_session();
    let mut stdout = std::io::stdout();

    console::write_banner(&mut stdout, &service.storage_status().notice())?;
    console::write_messages(&mut stdout, session.transcript())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "{}", console::PROMPT)?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match console::parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Message(text) => {
                writeln!(stdout, "Processing your request...")?;
                let replies = session.respond(&service, text).await;
                writeln!(stdout)?;
                console::write_replies(&mut stdout, &replies)?;
            }
        }
    }

    writeln!(stdout, "Goodbye! (conversation {})", session.id())?;
    Ok(())
}
