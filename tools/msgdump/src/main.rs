mod commands;
mod format;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    components::ComponentsArgs, get::GetArgs, offsets::OffsetsArgs, tree::TreeArgs,
};

#[derive(Parser)]
#[command(name = "msgdump", about = "Inspect message schemas and serialized payloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved component table of a schema
    Components(ComponentsArgs),
    /// Print the definition tree of a schema
    Tree(TreeArgs),
    /// Print the byte offset of every field in a payload
    Offsets(OffsetsArgs),
    /// Print one field of a payload, or the element count of an array
    Get(GetArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Components(args) => args.run(),
        Commands::Tree(args) => args.run(),
        Commands::Offsets(args) => args.run(),
        Commands::Get(args) => args.run(),
    }
}
