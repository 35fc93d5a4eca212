use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use crate::{format::format_value, input::SchemaInput};

#[derive(Args)]
pub struct GetArgs {
    #[command(flatten)]
    schema: SchemaInput,

    /// Path to the serialized payload
    payload: PathBuf,

    /// Field path with indices, e.g. poses[0].position.x
    field: String,

    /// Print the value as a number (time as seconds, strings parsed)
    #[arg(short, long)]
    number: bool,
}

impl GetArgs {
    pub fn run(self) -> Result<()> {
        let session = self.schema.ingest(&self.payload)?;

        if let Some(len) = session.array_len(&self.field) {
            println!("{len}");
            return Ok(());
        }
        let text = if self.number {
            session.get_number(&self.field).map(|n| n.to_string())
        } else {
            session.get_value(&self.field).map(|v| format_value(&v))
        };
        match text {
            Some(text) => println!("{text}"),
            None => bail!("no field at '{}'", self.field),
        }
        Ok(())
    }
}
