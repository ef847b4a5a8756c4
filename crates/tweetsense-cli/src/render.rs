//! Plain-text rendering of dashboard views. Formatting of scores and shares
//! happens only here; views keep full precision.

use std::fmt::{self, Write as _};

use tweetsense_analytics::{EntityScore, Series, ToRecord};
use tweetsense_client::{HealthResponse, MetaResponse, PredictResponse};

use crate::dashboard::{BatchResult, ExplorerView, SearchView};

const GAUGE_WIDTH: usize = 20;
const BAR_WIDTH: usize = 30;
const TEXT_PREVIEW_CHARS: usize = 60;

pub(crate) fn health(resp: &HealthResponse) -> String {
    if resp.ok {
        "service: ok\n".to_string()
    } else {
        "service: reported not ok\n".to_string()
    }
}

pub(crate) fn meta(resp: &MetaResponse) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "entities ({}):", resp.entities.len())?;
    for entity in &resp.entities {
        writeln!(out, "  {entity}")?;
    }
    writeln!(out, "sentiment filters: {}", resp.sentiments.join(", "))?;
    writeln!(
        out,
        "probabilities: {}",
        if resp.has_probabilities {
            "available"
        } else {
            "not available"
        }
    )?;
    Ok(out)
}

pub(crate) fn prediction(resp: &PredictResponse) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "predicted sentiment: {}", resp.sentiment)?;
    let ranked = resp.ranked_probabilities();
    if ranked.is_empty() {
        writeln!(out, "(model does not report probabilities)")?;
    }
    for (class, p) in ranked {
        writeln!(out, "  {class:<10}{:>6.1}%  {}", p * 100.0, bar_fraction(p, BAR_WIDTH))?;
    }
    Ok(out)
}

pub(crate) fn explorer(
    view: &ExplorerView,
    search: &SearchView<'_>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let a = &view.analytics;

    writeln!(out, "# Explorer")?;
    writeln!(
        out,
        "filters: entity={} sentiment={} keyword={:?}",
        view.request.entity, view.request.sentiment, view.request.keyword
    )?;
    writeln!(out)?;
    writeln!(out, "rows:          {}", view.total_rows)?;
    writeln!(
        out,
        "top entity:    {}",
        view.top_entity.as_deref().unwrap_or("\u{2014}")
    )?;
    writeln!(out, "neutral share: {:.1}%", view.share_neutral * 100.0)?;
    writeln!(out, "positive share: {:.1}%", view.share_positive * 100.0)?;
    writeln!(
        out,
        "sentiment index: {:+.2}  {}",
        a.sentiment_index,
        gauge(a.gauge_percent())
    )?;

    section(&mut out, "Distribution")?;
    bars(&mut out, &a.distribution_series)?;

    section(&mut out, "Most positive (of the most-discussed)")?;
    ranking(&mut out, &a.top_positive)?;
    section(&mut out, "Most negative (of the most-discussed)")?;
    ranking(&mut out, &a.top_negative)?;

    section(&mut out, "Mentions (top 10)")?;
    bars(&mut out, &a.leaderboard_series)?;

    section(&mut out, "Sentiment mix")?;
    if a.mix_series.labels.is_empty() {
        writeln!(out, "(no entity data for these filters)")?;
    } else {
        writeln!(
            out,
            "{:<25}{:>10}{:>10}{:>10}",
            "ENTITY", "NEGATIVE", "NEUTRAL", "POSITIVE"
        )?;
        for (i, label) in a.mix_series.labels.iter().enumerate() {
            writeln!(
                out,
                "{:<25}{:>10}{:>10}{:>10}",
                label, a.mix_series.negative[i], a.mix_series.neutral[i], a.mix_series.positive[i]
            )?;
        }
    }

    let scope = if search.query.trim().is_empty() {
        String::new()
    } else {
        format!(" matching {:?}", search.query.trim())
    };

    section(&mut out, &format!("Leaderboard{scope}"))?;
    if search.leaderboard.is_empty() {
        writeln!(out, "(no entities)")?;
    } else {
        writeln!(out, "{:<25}MENTIONS", "ENTITY")?;
        for entry in &search.leaderboard {
            writeln!(out, "{:<25}{}", entry.entity, entry.mentions)?;
        }
    }

    section(&mut out, &format!("Samples{scope}"))?;
    if search.samples.is_empty() {
        writeln!(out, "(no sample rows)")?;
    } else {
        writeln!(out, "{:<14}{:<20}{:<12}TEXT", "TWEET", "ENTITY", "SENTIMENT")?;
        for row in &search.samples {
            writeln!(
                out,
                "{:<14}{:<20}{:<12}{}",
                row.tweet_id.to_string(),
                row.entity,
                row.sentiment,
                preview(&row.text)
            )?;
        }
    }
    Ok(out)
}

pub(crate) fn batch(result: &BatchResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if result.rows.is_empty() {
        writeln!(out, "no rows with a non-empty `text` column to predict")?;
        return Ok(out);
    }
    writeln!(
        out,
        "predicted {} rows ({} skipped without text): {} negative, {} neutral, {} positive",
        result.rows.len(),
        result.dropped,
        result.counts.negative,
        result.counts.neutral,
        result.counts.positive
    )?;
    writeln!(out)?;
    writeln!(out, "{:<6}{:<12}{:>6}  TEXT", "ID", "PREDICTED", "CONF")?;
    for (i, row) in result.rows.iter().enumerate() {
        let confidence = match result.confidence.get(i).copied().flatten() {
            Some(p) => format!("{:.0}%", p * 100.0),
            None => "-".to_string(),
        };
        writeln!(
            out,
            "{:<6}{:<12}{confidence:>6}  {}",
            row.id,
            row.predicted_sentiment,
            preview(row.text())
        )?;
    }
    // Uploaded columns carried through to export.
    let extra: Vec<String> = result.rows[0]
        .to_record()
        .keys()
        .filter(|k| !matches!(*k, "text" | "id" | "predicted_sentiment"))
        .map(ToString::to_string)
        .collect();
    if !extra.is_empty() {
        writeln!(out, "\nother columns: {}", extra.join(", "))?;
    }
    Ok(out)
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "\n## {title}")
}

fn ranking(out: &mut String, scores: &[EntityScore]) -> fmt::Result {
    if scores.is_empty() {
        return writeln!(out, "(no entity data for these filters)");
    }
    for s in scores {
        writeln!(
            out,
            "{:<25}{:+.2}  ({} pos / {} neg / {} neu)",
            s.entity, s.score, s.pos, s.neg, s.neu
        )?;
    }
    Ok(())
}

fn bars(out: &mut String, series: &Series) -> fmt::Result {
    let max = series.values.iter().copied().max().unwrap_or(0);
    if series.labels.is_empty() || max == 0 {
        return writeln!(out, "(no data)");
    }
    for (label, &value) in series.labels.iter().zip(&series.values) {
        #[allow(clippy::cast_precision_loss)]
        let fraction = value as f64 / max as f64;
        writeln!(out, "{label:<25}{value:>8}  {}", bar_fraction(fraction, BAR_WIDTH))?;
    }
    Ok(())
}

fn gauge(percent: f64) -> String {
    format!(
        "[{}] {percent:.0}/100",
        pad_bar(&bar_fraction(percent / 100.0, GAUGE_WIDTH), GAUGE_WIDTH)
    )
}

fn bar_fraction(fraction: f64, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "#".repeat(filled)
}

fn pad_bar(bar: &str, width: usize) -> String {
    format!("{bar:-<width$}")
}

fn preview(text: &str) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    match single_line.char_indices().nth(TEXT_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}…", &single_line[..idx]),
        None => single_line,
    }
}
