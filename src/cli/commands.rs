use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lar", about = concat!("[=] larder v", env!("CARGO_PKG_VERSION"), " - the household shopping list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different list directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a larder.toml and an empty list here
    Init(InitArgs),
    /// Add an item ("Milk (2 gallons)", "Eggs x12", "3 onions")
    Add(AddArgs),
    /// Show the list, grouped by store
    List(ListArgs),
    /// Show one item in full
    Show(ShowArgs),
    /// Edit an item's fields
    Edit(EditArgs),
    /// Toggle an item checked/unchecked
    Check(CheckArgs),
    /// Remove an item
    Rm(RmArgs),
    /// Move an item (reorder or change store)
    Mv(MvArgs),
    /// Remove every checked item
    Clear,
    /// Manage stores
    Store(StoreCmd),
    /// Recently removed items: list them, or re-add one by name
    Recall(RecallArgs),
    /// Re-render the list whenever another writer changes it
    Watch,
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// List file name (default: list.json)
    #[arg(long)]
    pub file: Option<String>,
    /// Reinitialize even if larder.toml already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Entry text; a quantity is parsed out of it ("Apples 2 lbs")
    pub entry: String,
    /// Destination store (id or name)
    #[arg(long)]
    pub store: Option<String>,
    /// Quantity, overriding anything parsed from the entry
    #[arg(long)]
    pub quantity: Option<String>,
    /// Category tag
    #[arg(long)]
    pub category: Option<String>,
    /// The household wants the organic version
    #[arg(long)]
    pub organic: bool,
    /// On a duplicate, fold the quantity into the existing item
    #[arg(long, conflicts_with = "force")]
    pub merge: bool,
    /// On a duplicate, add an independent second entry
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only this store's section (id or name)
    #[arg(long)]
    pub store: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: String,
    /// New display name
    #[arg(long)]
    pub name: Option<String>,
    /// New quantity text ("" clears it)
    #[arg(long)]
    pub quantity: Option<String>,
    /// New category tag ("" clears it)
    #[arg(long)]
    pub category: Option<String>,
    /// Require (or stop requiring) the organic version
    #[arg(long)]
    pub organic: Option<bool>,
}

#[derive(Args)]
pub struct CheckArgs {
    pub id: String,
}

#[derive(Args)]
pub struct RmArgs {
    pub id: String,
}

#[derive(Args)]
pub struct MvArgs {
    pub id: String,
    /// Destination store (id or name)
    #[arg(long, conflicts_with = "unassigned")]
    pub store: Option<String>,
    /// Move to the unassigned group
    #[arg(long)]
    pub unassigned: bool,
    /// Land immediately before this item
    #[arg(long, conflicts_with_all = ["up", "down"])]
    pub before: Option<String>,
    /// Swap with the previous item
    #[arg(long, conflicts_with = "down")]
    pub up: bool,
    /// Swap with the next item
    #[arg(long)]
    pub down: bool,
}

#[derive(Args)]
pub struct StoreCmd {
    #[command(subcommand)]
    pub command: StoreCommands,
}

#[derive(Subcommand)]
pub enum StoreCommands {
    /// Add a store at the end of the display order
    Add { name: String },
    /// Rename a store
    Rename { id: String, name: String },
    /// Remove a store (its items fall back to Unassigned)
    Rm { id: String },
    /// List stores in display order
    List,
}

#[derive(Args)]
pub struct RecallArgs {
    /// Name to re-add; omit to list the recall buffer
    pub name: Option<String>,
    /// On a duplicate, fold the quantity into the existing item
    #[arg(long, conflicts_with = "force")]
    pub merge: bool,
    /// On a duplicate, add an independent second entry
    #[arg(long)]
    pub force: bool,
}
