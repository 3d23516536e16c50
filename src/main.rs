use std::fmt::{Debug, Display};

use threadline::cache::run_cache_sweeper;
use threadline::configuration::get_config;
use threadline::startup::Application;
use threadline::telemetry::{get_subscriber, init_subscriber};
use tokio::task::JoinError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("threadline".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_config()?;
    let sweep_interval = configuration.cache.sweep_interval();

    let application = Application::build(configuration).await?;
    let sweeper_task = tokio::spawn(run_cache_sweeper(application.cache(), sweep_interval));
    let application_task = tokio::spawn(application.run_until_stopped());

    tokio::select! {
        outcome = application_task => report_exit("API", outcome),
        outcome = sweeper_task => report_exit("Cache sweeper", outcome),
    };

    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{}' task failed to complete",
                task_name
            )
        }
    }
}
