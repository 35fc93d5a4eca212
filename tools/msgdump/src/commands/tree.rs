use anyhow::{Result, bail};
use clap::Args;

use crate::input::SchemaInput;

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    schema: SchemaInput,

    /// List only the direct children of this field path
    #[arg(short, long)]
    path: Option<String>,
}

impl TreeArgs {
    pub fn run(self) -> Result<()> {
        let session = self.schema.register()?;

        let Some(path) = self.path else {
            print!("{}", session.print_definition_tree().unwrap_or_default());
            return Ok(());
        };
        let Some(fields) = session.list_fields(&path) else {
            bail!("no field at '{path}'");
        };
        for field in fields {
            let kind = if field.is_primitive { "primitive" } else { "composite" };
            println!(
                "{}  {}{}  ({kind})",
                field.path, field.type_name, field.array
            );
        }
        Ok(())
    }
}
