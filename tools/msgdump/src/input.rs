use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use msgintro::Introspector;

/// Hash used when none is given; the CLI only ever holds one schema.
const DEFAULT_HASH: &str = "msgdump";

#[derive(Args)]
pub struct SchemaInput {
    /// Path to the message definition (root fields, then `MSG:` sections)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Fully qualified root type, e.g. geometry_msgs/PoseArray
    #[arg(short = 't', long = "type")]
    pub type_name: String,

    /// Content hash to register the schema under
    #[arg(long, default_value = DEFAULT_HASH)]
    pub hash: String,
}

impl SchemaInput {
    pub fn register(&self) -> Result<Introspector> {
        let text = fs::read_to_string(&self.schema)
            .with_context(|| format!("failed to read {}", self.schema.display()))?;
        let mut session = Introspector::new();
        session.register(&self.hash, &self.type_name, &text)?;
        Ok(session)
    }

    /// Register the schema and ingest the payload at `payload`.
    pub fn ingest(&self, payload: &Path) -> Result<Introspector> {
        let mut session = self.register()?;
        let data =
            fs::read(payload).with_context(|| format!("failed to read {}", payload.display()))?;
        session.ingest(&self.hash, &data)?;
        Ok(session)
    }
}
