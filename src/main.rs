use anyhow::{bail, Result};
use clap::Parser;
use log::{error, info};

mod cli;

use cli::Args;
use pdf_renamer::{batch, pdf};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    // Preview mode: dump one file's text layer, touch nothing.
    if let Some(pdf_path) = args.preview {
        let text = pdf::extract_text(&pdf_path)?;
        print!("{text}");
        return Ok(());
    }

    let field_name = args
        .field_name
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_owned();
    if field_name.is_empty() {
        bail!("field name must not be empty");
    }
    if !args.dir.is_dir() {
        bail!("not a directory: {}", args.dir.display());
    }

    info!(
        "renaming PDFs in {} by field '{}'",
        args.dir.display(),
        field_name
    );

    // The batch runs on a blocking worker and reports through a one-way
    // channel; the channel closing is the only completion signal.
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let dir = args.dir.clone();
    tokio::task::spawn_blocking(move || {
        let mut emit = |event| {
            // A closed receiver just means nobody is listening anymore.
            let _ = tx.send(event);
        };
        if let Err(e) = batch::rename_pdfs_by_field(&dir, &field_name, &mut emit) {
            error!("batch did not start: {e}");
        }
    });

    while let Some(event) = rx.recv().await {
        println!("{event}");
    }

    Ok(())
}
