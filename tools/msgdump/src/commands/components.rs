use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::input::SchemaInput;

#[derive(Args)]
pub struct ComponentsArgs {
    #[command(flatten)]
    schema: SchemaInput,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ComponentsArgs {
    pub fn run(self) -> Result<()> {
        let session = self.schema.register()?;
        let schema = session.schema().context("no schema registered")?;
        let mut text = session.print_components().unwrap_or_default();
        for r in schema.components().unresolved() {
            let candidates = if r.candidates.is_empty() {
                "no candidates".to_string()
            } else {
                r.candidates.join(", ")
            };
            text.push_str(&format!(
                "unresolved {}.{}: '{}' ({candidates})\n",
                r.component, r.field, r.type_name
            ));
        }

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
