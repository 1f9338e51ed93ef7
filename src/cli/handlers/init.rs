use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::document;
use crate::model::ShoppingList;

const CONFIG_TEMPLATE: &str = r#"[list]
# The shared list document. Point every household member's checkout at the
# same directory (synced folder, network share, etc.) to share one list.
file = "{file}"

[merge]
# How a duplicate's quantity folds into the existing item:
#   "sum"    - add amounts when the unit words match, join the texts otherwise
#   "concat" - always join the texts
policy = "sum"
"#;

/// Create larder.toml and an empty list document in `dir`.
pub fn cmd_init(args: InitArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = dir.join("larder.toml");
    if config_path.exists() && !args.force {
        return Err("larder.toml already exists here (use --force to reinitialize)".into());
    }

    let file = args.file.unwrap_or_else(|| "list.json".to_string());
    fs::write(&config_path, CONFIG_TEMPLATE.replace("{file}", &file))?;

    let list_path = dir.join(&file);
    if !list_path.exists() || args.force {
        document::save_list(&list_path, &ShoppingList::new())?;
    }

    println!("initialized list at {}", list_path.display());
    Ok(())
}
