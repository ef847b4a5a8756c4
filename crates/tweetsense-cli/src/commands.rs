//! Command handlers for the CLI.
//!
//! Each handler drives one dashboard controller to completion, writes the
//! rendered view to `out`, and turns a failed flow into an error for `main`.

use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use chrono::{SecondsFormat, Utc};
use tweetsense_analytics::{export_csv_file, read_csv_file, Record, ToRecord};
use tweetsense_client::{ApiClient, ExploreRequest};
use tweetsense_core::{Flow, FlowState};

use crate::dashboard::{BatchController, ExplorerController, PredictController};
use crate::render;

/// Options for an explorer run beyond the query itself.
#[derive(Debug, Default)]
pub(crate) struct ExploreOutputs<'a> {
    pub search: Option<&'a str>,
    pub export_samples: Option<&'a Path>,
    pub wordcloud: Option<&'a Path>,
}

/// Returns the flow's data, or an error naming the flow if it failed.
fn settled<T>(flow: &Flow<T>) -> anyhow::Result<&T> {
    match flow.state() {
        FlowState::Success(data) => Ok(data),
        FlowState::Failed(message) => anyhow::bail!("{} failed: {message}", flow.name()),
        FlowState::Idle | FlowState::Pending => {
            anyhow::bail!("{} did not run", flow.name())
        }
    }
}

pub(crate) async fn run_health(client: &ApiClient, out: &mut impl Write) -> anyhow::Result<()> {
    let health = client.health().await?;
    write!(out, "{}", render::health(&health))?;
    if !health.ok {
        anyhow::bail!("service at {} is not healthy", client.base_url());
    }
    Ok(())
}

pub(crate) async fn run_meta(client: &ApiClient, out: &mut impl Write) -> anyhow::Result<()> {
    let meta = client.meta().await?;
    write!(out, "{}", render::meta(&meta)?)?;
    Ok(())
}

pub(crate) async fn run_predict(
    client: &ApiClient,
    text: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("--text must not be empty");
    }
    let mut predict = PredictController::default();
    let response = settled(predict.run(client, text).await)?;
    write!(out, "{}", render::prediction(response)?)?;
    Ok(())
}

pub(crate) async fn run_explore(
    client: &ApiClient,
    request: ExploreRequest,
    outputs: &ExploreOutputs<'_>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut explorer = ExplorerController::default();
    let view = settled(explorer.run(client, request).await)?;
    let search = view.search(outputs.search.unwrap_or(""));

    writeln!(
        out,
        "fetched {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    write!(out, "{}", render::explorer(view, &search)?)?;

    if let Some(path) = outputs.export_samples {
        let records: Vec<Record> = search.samples.iter().map(|row| row.to_record()).collect();
        let written = export_csv_file(&records, path)?;
        writeln!(out, "\nexported {written} sample rows to {}", path.display())?;
    }

    if let Some(path) = outputs.wordcloud {
        match &view.wordcloud_png {
            Some(png) => {
                std::fs::write(path, png)
                    .with_context(|| format!("writing {}", path.display()))?;
                writeln!(out, "word cloud written to {}", path.display())?;
            }
            None => writeln!(out, "no word cloud available for these filters")?,
        }
    }
    Ok(())
}

pub(crate) async fn run_batch(
    client: &ApiClient,
    input: &Path,
    output: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let uploaded = read_csv_file(input)?;
    tracing::info!(path = %input.display(), rows = uploaded.len(), "batch upload read");

    let mut batch = BatchController::default();
    let result = settled(batch.run(client, uploaded).await)?;
    write!(out, "{}", render::batch(result)?)?;

    if let Some(path) = output {
        if result.rows.is_empty() {
            writeln!(out, "nothing to export")?;
        } else {
            let records: Vec<Record> = result.rows.iter().map(ToRecord::to_record).collect();
            let written = export_csv_file(&records, path)?;
            writeln!(out, "\nexported {written} rows to {}", path.display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
