use anyhow::Context;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use eq_app::config::load_config;
use eq_app::logging::init_logging;
use eq_app::{Catalogue, Command, Driver, Step};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_logging(&config.logging)?;

    tracing::info!(
        environment = ?config.environment,
        language = %config.language,
        "Starting EduQuiz signup shell"
    );

    let catalogue = Catalogue::load().context("failed to load message catalogue")?;
    let settings = catalogue.settings(config.language, &config.verification);
    let shell_messages = catalogue.messages(config.language).shell.clone();
    let backend = eq_infra::connect(&config.backend).context("failed to connect backend")?;
    let driver =
        Driver::new(backend, settings, shell_messages).context("failed to build signup form")?;

    let mut stdout = io::stdout();
    stdout
        .write_all(b"EduQuiz signup. Type 'help' for commands.\n")
        .await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(eq_app::CommandError::Empty) => continue,
            Err(error) => {
                stdout.write_all(format!("{error}\n").as_bytes()).await?;
                continue;
            }
        };

        match driver.execute(command).await {
            Step::Continue(text) if text.is_empty() => {}
            Step::Continue(text) => stdout.write_all(format!("{text}\n").as_bytes()).await?,
            Step::Quit => break,
        }
    }

    tracing::info!("Signup shell stopped");
    Ok(())
}
