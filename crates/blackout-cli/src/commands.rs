//! Command implementations: each drives the upload/classify/redact/extract
//! workflow through the shared document store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use blackout_ai::{ClaudeClient, classify_blocks, extract_insertion_data, extract_show_data};
use blackout_core::redact::redaction_plan;
use blackout_core::{ClassifyVariant, ExtractionVariant, expand_insertions};
use blackout_sheets::{
    PER_INSERTION_HEADERS, SHOW_LEVEL_HEADERS, SheetsClient, insertion_row, show_row,
};
use blackout_store::DocumentStore;
use tracing::info;
use uuid::Uuid;

pub fn inspect(pdf: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(pdf).with_context(|| format!("reading {}", pdf.display()))?;
    let blocks = blackout_pdf::extract_blocks(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&blocks)?);
    Ok(())
}

pub async fn classify(pdf: &Path, variant: ClassifyVariant) -> anyhow::Result<()> {
    let store = DocumentStore::new();
    let (id, _) = upload_and_classify(&store, pdf, variant).await?;

    let record = store.get(&id)?;
    let classification = record
        .classification
        .context("classification missing after classify call")?;
    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}

pub async fn redact(
    pdf: &Path,
    show: &str,
    variant: ClassifyVariant,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = DocumentStore::new();
    let (id, _) = upload_and_classify(&store, pdf, variant).await?;

    let record = store.get(&id)?;
    let classification = record
        .classification
        .context("classification missing after classify call")?;

    let plan = redaction_plan(&classification, show)?;
    info!(show, keep = plan.keep.len(), redact = plan.redact.len(), "computed redaction plan");

    let redacted = blackout_pdf::redact_blocks(&record.pdf_bytes, &record.blocks, &plan.redact)?;

    let out = out.unwrap_or_else(|| default_out_path(pdf, show));
    fs::write(&out, &redacted).with_context(|| format!("writing {}", out.display()))?;
    println!("{}", out.display());
    Ok(())
}

pub async fn extract(
    pdf: &Path,
    layout: ExtractionVariant,
    variant: ClassifyVariant,
    push: bool,
) -> anyhow::Result<()> {
    let store = DocumentStore::new();
    let (id, client) = upload_and_classify(&store, pdf, variant).await?;

    let record = store.get(&id)?;
    let classification = record
        .classification
        .context("classification missing after classify call")?;
    if classification.shows.is_empty() {
        bail!("no shows identified in this contract; retry classification");
    }

    match layout {
        ExtractionVariant::ShowLevel => {
            let records = extract_show_data(&client, &record.blocks, &classification).await?;
            if records.is_empty() {
                bail!("extraction returned no records");
            }
            if push {
                let rows = records.iter().map(show_row).collect();
                let url = SheetsClient::from_env()?
                    .append_rows(&SHOW_LEVEL_HEADERS, rows)
                    .await?;
                println!("{url}");
            } else {
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
        }
        ExtractionVariant::PerInsertion => {
            let records = extract_insertion_data(&client, &record.blocks, &classification).await?;
            if records.is_empty() {
                bail!("extraction returned no records");
            }
            let rows: Vec<_> = records.iter().flat_map(expand_insertions).collect();
            if push {
                let cells = rows.iter().map(insertion_row).collect();
                let url = SheetsClient::from_env()?
                    .append_rows(&PER_INSERTION_HEADERS, cells)
                    .await?;
                println!("{url}");
            } else {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
        }
    }
    Ok(())
}

/// Read the PDF, extract its blocks, classify them, and persist both in
/// the store. Returns the document ID and the model client for reuse.
async fn upload_and_classify(
    store: &DocumentStore,
    pdf: &Path,
    variant: ClassifyVariant,
) -> anyhow::Result<(Uuid, ClaudeClient)> {
    let bytes = fs::read(pdf).with_context(|| format!("reading {}", pdf.display()))?;
    let blocks = blackout_pdf::extract_blocks(&bytes)?;
    let id = store.insert(bytes, blocks.clone());

    let client = ClaudeClient::from_env()?;
    let classification = classify_blocks(&client, &blocks, variant).await?;
    store.set_classification(&id, classification)?;
    Ok((id, client))
}

fn default_out_path(pdf: &Path, show: &str) -> PathBuf {
    let stem = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "contract".to_string());
    let safe_show: String = show
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    pdf.with_file_name(format!("{stem}-{safe_show}-redacted.pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_out_path_sanitizes_show_name() {
        let out = default_out_path(Path::new("/tmp/contract.pdf"), "The Morning Show");
        assert_eq!(
            out,
            Path::new("/tmp/contract-The-Morning-Show-redacted.pdf")
        );
    }
}
