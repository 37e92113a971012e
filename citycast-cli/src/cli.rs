use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use clap::Parser;
use inquire::{InquireError, Text};

use citycast_core::{
    Config, RenderPort, SearchController, SearchOutcome, SystemClock, provider_from_config,
};

use crate::view::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather and 5-day forecast for a city")]
pub struct Cli {
    /// City to look up. Without it, an interactive prompt is opened.
    pub city: Option<String>,

    /// Settings file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        tracing::debug!(?config, "Configuration loaded");

        let provider =
            provider_from_config(&config).context("Failed to initialize weather provider")?;
        let controller =
            SearchController::new(provider, Box::new(SystemClock), TerminalView::stdout());

        match self.city {
            Some(city) => match controller.search(&city).await {
                SearchOutcome::Ignored => bail!("City name is empty"),
                SearchOutcome::Failed => bail!("No weather for '{}'", city.trim()),
                SearchOutcome::Rendered | SearchOutcome::Superseded => Ok(()),
            },
            None => prompt_loop(&controller).await,
        }
    }
}

/// Prompt for cities until the user cancels. Enter submits.
async fn prompt_loop<R: RenderPort>(controller: &SearchController<R>) -> anyhow::Result<()> {
    read_loop(controller, read_city).await
}

fn read_city() -> Result<String, InquireError> {
    Text::new("City:")
        .with_placeholder("e.g. Paris")
        .with_help_message("Enter to search, Esc to quit")
        .prompt()
}

/// Feed cities from `read` into the controller. `read` blocks, so it runs on
/// the blocking pool rather than a runtime worker.
async fn read_loop<R, F>(controller: &SearchController<R>, read: F) -> anyhow::Result<()>
where
    R: RenderPort,
    F: Fn() -> Result<String, InquireError> + Send + Sync + 'static,
{
    let read = Arc::new(read);
    loop {
        let reader = Arc::clone(&read);
        let input = tokio::task::spawn_blocking(move || (*reader)())
            .await
            .context("City prompt task failed")?;

        match input {
            Ok(city) => {
                controller.search(&city).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read city name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citycast_core::{OpenMeteoProvider, SearchState};
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays canned answers; `None` acts like pressing Esc.
    fn scripted(answers: Vec<Option<&'static str>>) -> impl Fn() -> Result<String, InquireError> {
        let answers = Mutex::new(VecDeque::from(answers));
        move || match answers.lock().pop_front().flatten() {
            Some(city) => Ok(city.to_string()),
            None => Err(InquireError::OperationCanceled),
        }
    }

    fn controller() -> SearchController<TerminalView<Vec<u8>>> {
        // Never contacted: the loop below only submits blank input.
        let provider =
            OpenMeteoProvider::with_endpoints("http://127.0.0.1:9/geo", "http://127.0.0.1:9/wx");
        SearchController::new(Box::new(provider), Box::new(SystemClock), TerminalView::new(Vec::new()))
    }

    #[tokio::test]
    async fn loop_ends_when_prompt_is_cancelled() {
        let ctl = controller();

        let result = read_loop(&ctl, scripted(vec![Some("   "), Some(""), None])).await;

        assert!(result.is_ok());
        assert_eq!(ctl.state(), SearchState::Idle);
        assert!(ctl.view().contents().is_empty());
    }

    #[tokio::test]
    async fn prompt_failure_is_reported() {
        let ctl = controller();

        let err = read_loop(&ctl, || Err(InquireError::NotTTY)).await.unwrap_err();

        assert!(err.to_string().contains("Failed to read city name"));
    }
}
