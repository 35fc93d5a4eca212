use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    format::{OutputFormat, format_offsets},
    input::SchemaInput,
};

#[derive(Args)]
pub struct OffsetsArgs {
    #[command(flatten)]
    schema: SchemaInput,

    /// Path to the serialized payload
    payload: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl OffsetsArgs {
    pub fn run(self) -> Result<()> {
        let session = self.schema.ingest(&self.payload)?;
        let layout = session.layout().context("payload was not laid out")?;
        let text = format_offsets(layout, self.format)?;

        match self.output {
            Some(path) => fs::write(path, format!("{text}\n"))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}
