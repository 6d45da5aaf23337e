use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pdf-renamer")]
#[command(about = "Rename PDF files after a field value found in their text layer")]
#[command(version)]
pub struct Args {
    /// Field name whose value becomes each file's new name
    #[arg(required_unless_present = "preview")]
    pub field_name: Option<String>,

    /// Folder holding the PDFs to rename
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Print one PDF's extracted text and exit without renaming anything
    #[arg(long, value_name = "PDF")]
    pub preview: Option<PathBuf>,
}
