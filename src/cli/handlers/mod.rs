mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tracing::warn;

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::document::{self, DocumentError};
use crate::io::lock::ListLock;
use crate::io::watcher::ListWatcher;
use crate::model::{AppConfig, Bucket, MergePolicy, ShoppingList};
use crate::ops::dedup::{ConcatMerger, DuplicateResolution, QuantityMerger, SumMerger};
use crate::ops::item_ops::{self, AddItemOptions, AddOutcome};
use crate::ops::moves::{self, MoveDestination};
use crate::ops::recall::RecallBuffer;
use crate::ops::sections::build_sections;
use crate::ops::store_ops;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Global override for the list directory (set by the -C flag)
static DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    if let Some(ref dir) = cli.dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        Commands::Init(args) => cmd_init(args, &start_dir()?),
        Commands::Add(args) => cmd_add(args),
        Commands::List(args) => cmd_list(args, json),
        Commands::Show(args) => cmd_show(args, json),
        Commands::Edit(args) => cmd_edit(args),
        Commands::Check(args) => cmd_check(args),
        Commands::Rm(args) => cmd_rm(args),
        Commands::Mv(args) => cmd_mv(args),
        Commands::Clear => cmd_clear(),
        Commands::Store(args) => cmd_store(args, json),
        Commands::Recall(args) => cmd_recall(args, json),
        Commands::Watch => cmd_watch(),
    }
}

// ---------------------------------------------------------------------------
// Context helpers
// ---------------------------------------------------------------------------

fn start_dir() -> Result<PathBuf, std::io::Error> {
    match DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir(),
    }
}

/// Find the list root for this invocation.
fn locate() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(document::discover_root(&start_dir()?)?)
}

fn load(root: &Path) -> Result<(AppConfig, ShoppingList), DocumentError> {
    let config = document::load_config(root)?;
    let list = document::load_list(&document::list_path(root, &config))?;
    Ok((config, list))
}

fn save(root: &Path, config: &AppConfig, list: &ShoppingList) -> Result<(), DocumentError> {
    document::save_list(&document::list_path(root, config), list)
}

fn merger(config: &AppConfig) -> Box<dyn QuantityMerger> {
    match config.merge.policy {
        MergePolicy::Sum => Box::new(SumMerger),
        MergePolicy::Concat => Box::new(ConcatMerger),
    }
}

/// Resolve a store argument — an id, or a case-insensitive name — to an id.
fn resolve_store(list: &ShoppingList, arg: &str) -> Result<String, String> {
    if let Some(store) = list.store(arg) {
        return Ok(store.id.clone());
    }
    let lower = arg.to_lowercase();
    let mut hits = list.stores.iter().filter(|s| s.name.to_lowercase() == lower);
    match (hits.next(), hits.next()) {
        (Some(store), None) => Ok(store.id.clone()),
        (Some(_), Some(_)) => Err(format!("store name '{}' is ambiguous, use the id", arg)),
        (None, _) => Err(format!("no store matching '{}'", arg)),
    }
}

fn quantity_suffix(quantity: Option<&str>) -> String {
    quantity.map(|q| format!(" ({})", q)).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> CmdResult {
    let root = locate()?;
    let _lock = ListLock::acquire_default(&root)?;
    let (config, mut list) = load(&root)?;

    let store_id = args
        .store
        .as_deref()
        .map(|s| resolve_store(&list, s))
        .transpose()?;
    let options = AddItemOptions {
        store_id,
        quantity: args.quantity,
        category: args.category,
        organic_required: args.organic,
    };

    let outcome = item_ops::begin_add(&list, &args.entry, options);
    apply_add(&root, &config, &mut list, outcome, args.merge, args.force)
}

/// Drive an [`AddOutcome`] to completion under the CLI's duplicate flags.
/// Nothing is written until a resolution is settled.
fn apply_add(
    root: &Path,
    config: &AppConfig,
    list: &mut ShoppingList,
    outcome: AddOutcome,
    merge: bool,
    force: bool,
) -> CmdResult {
    match outcome {
        // Empty entries are a silent no-op.
        AddOutcome::Empty => Ok(()),
        AddOutcome::Clear(candidate) => {
            let name = candidate.name.clone();
            let quantity = candidate.quantity.clone();
            let id = item_ops::insert_candidate(list, candidate);
            save(root, config, list)?;
            println!("added {}: {}{}", id, name, quantity_suffix(quantity.as_deref()));
            Ok(())
        }
        AddOutcome::Duplicate {
            existing_id,
            candidate,
        } => {
            let resolution = if merge {
                DuplicateResolution::Merge
            } else if force {
                DuplicateResolution::AddAnyway
            } else {
                return Err(format!(
                    "\"{}\" is already on the list ({}); rerun with --merge or --force, or change the entry",
                    candidate.name, existing_id
                )
                .into());
            };

            let name = candidate.name.clone();
            let inserted = item_ops::resolve_duplicate(
                list,
                &existing_id,
                candidate,
                resolution,
                merger(config).as_ref(),
            )?;
            save(root, config, list)?;
            match inserted {
                Some(id) => println!("added {}: {} (duplicate of {})", id, name, existing_id),
                None => {
                    let quantity = list.item(&existing_id).and_then(|i| i.quantity.clone());
                    println!(
                        "merged into {}: {}{}",
                        existing_id,
                        name,
                        quantity_suffix(quantity.as_deref())
                    );
                }
            }
            Ok(())
        }
    }
}

fn cmd_edit(args: EditArgs) -> CmdResult {
    let root = locate()?;
    let _lock = ListLock::acquire_default(&root)?;
    let (config, mut list) = load(&root)?;

    item_ops::update_item(&mut list, &args.id, item_ops::UpdateItem {
        name: args.name,
        quantity: args.quantity,
        category: args.category,
        organic_required: args.organic,
    })?;
    save(&root, &config, &list)?;

    let item = list.item(&args.id).expect("updated above");
    println!("updated {}: {}", item.id, item.name);
    Ok(())
}

fn cmd_check(args: CheckArgs) -> CmdResult {
    let root = locate()?;
    let _lock = ListLock::acquire_default(&root)?;
    let (config, mut list) = load(&root)?;

    item_ops::toggle_checked(&mut list, &args.id)?;
    save(&root, &config, &list)?;

    let item = list.item(&args.id).expect("toggled above");
    let verb = if item.checked { "checked" } else { "unchecked" };
    println!("{} {}: {}", verb, item.id, item.name);
    Ok(())
}

fn cmd_rm(args: RmArgs) -> CmdResult {
    let root = locate()?;
    let _lock = ListLock::acquire_default(&root)?;
    let (config, mut list) = load(&root)?;

    let removed = item_ops::delete_item(&mut list, &args.id)?;
    let mut recall = RecallBuffer::from_names(list.recently_removed.clone());
    recall.record(&removed.name);
    list.recently_removed = recall.to_vec();
    save(&root, &config, &list)?;

    println!("removed {}: {}", removed.id, removed.name);
    Ok(())
}

fn cmd_clear() -> CmdResult {
    let root = locate()?;
    let _lock = ListLock::acquire_default(&root)?;
    let (config, mut list) = load(&root)?;

    let removed = item_ops::clear_checked(&mut list);
    if removed.is_empty() {
        println!("nothing checked");
        return Ok(());
    }
    let mut recall = RecallBuffer::from_names(list.recently_removed.clone());
    for item in &removed {
        recall.record(&item.name);
    }
    list.recently_removed = recall.to_vec();
    save(&root, &config, &list)?;

    println!("cleared {} checked item(s)", removed.len());
    Ok(())
}

fn cmd_mv(args: MvArgs) -> CmdResult {
    let root = locate()?;
    let _lock = ListLock::acquire_default(&root)?;
    let (config, mut list) = load(&root)?;

    if args.up {
        moves::move_up(&mut list, &args.id)?;
    } else if args.down {
        moves::move_down(&mut list, &args.id)?;
    } else {
        let bucket = if args.unassigned {
            Some(Bucket::Unassigned)
        } else if let Some(store) = &args.store {
            Some(Bucket::Store(resolve_store(&list, store)?))
        } else {
            None
        };
        moves::move_item(&mut list, &args.id, MoveDestination {
            bucket,
            before_id: args.before.clone(),
        })?;
    }
    save(&root, &config, &list)?;

    let item = list.item(&args.id).expect("moved above");
    println!("moved {}: {}", item.id, item.name);
    Ok(())
}

fn cmd_store(args: StoreCmd, json: bool) -> CmdResult {
    match args.command {
        StoreCommands::Add { name } => {
            let root = locate()?;
            let _lock = ListLock::acquire_default(&root)?;
            let (config, mut list) = load(&root)?;
            let id = store_ops::add_store(&mut list, name.clone());
            save(&root, &config, &list)?;
            println!("added store {}: {}", id, name);
            Ok(())
        }
        StoreCommands::Rename { id, name } => {
            let root = locate()?;
            let _lock = ListLock::acquire_default(&root)?;
            let (config, mut list) = load(&root)?;
            store_ops::rename_store(&mut list, &id, name.clone())?;
            save(&root, &config, &list)?;
            println!("renamed store {}: {}", id, name);
            Ok(())
        }
        StoreCommands::Rm { id } => {
            let root = locate()?;
            let _lock = ListLock::acquire_default(&root)?;
            let (config, mut list) = load(&root)?;
            let removed = store_ops::delete_store(&mut list, &id)?;
            save(&root, &config, &list)?;
            println!(
                "removed store {}: {} (its items are now unassigned)",
                removed.id, removed.name
            );
            Ok(())
        }
        StoreCommands::List => {
            let root = locate()?;
            let (_, list) = load(&root)?;
            if json {
                let stores: Vec<_> = list.stores.iter().map(output::store_to_json).collect();
                println!("{}", serde_json::to_string_pretty(&stores)?);
            } else {
                for store in &list.stores {
                    println!("{}  {}", store.id, store.name);
                }
            }
            Ok(())
        }
    }
}

fn cmd_recall(args: RecallArgs, json: bool) -> CmdResult {
    let root = locate()?;

    match args.name {
        None => {
            let (_, list) = load(&root)?;
            let recall = RecallBuffer::from_names(list.recently_removed);
            if json {
                println!("{}", serde_json::to_string_pretty(&recall.to_vec())?);
            } else if recall.is_empty() {
                println!("nothing recently removed");
            } else {
                for (n, name) in recall.names().enumerate() {
                    println!("{}. {}", n + 1, name);
                }
            }
            Ok(())
        }
        Some(name) => {
            let _lock = ListLock::acquire_default(&root)?;
            let (config, mut list) = load(&root)?;
            let mut recall = RecallBuffer::from_names(list.recently_removed.clone());
            let Some(taken) = recall.take(&name) else {
                return Err(format!("'{}' is not in the recall list", name).into());
            };
            list.recently_removed = recall.to_vec();

            // Re-adding is a normal add: same parsing, same duplicate check.
            let outcome = item_ops::begin_add(&list, &taken, AddItemOptions::default());
            apply_add(&root, &config, &mut list, outcome, args.merge, args.force)
        }
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> CmdResult {
    let root = locate()?;
    let (_, list) = load(&root)?;

    let filter = args
        .store
        .as_deref()
        .map(|s| resolve_store(&list, s))
        .transpose()?;

    let sections = build_sections(&list.items, &list.stores);
    let sections: Vec<_> = match &filter {
        Some(sid) => sections
            .into_iter()
            .filter(|s| s.bucket.store_id() == Some(sid.as_str()))
            .collect(),
        None => sections,
    };

    if json {
        let out: Vec<_> = sections.iter().map(output::section_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in output::format_sections(&sections) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> CmdResult {
    let root = locate()?;
    let (_, list) = load(&root)?;
    let item = list
        .item(&args.id)
        .ok_or_else(|| format!("item not found: {}", args.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output::item_to_json(item))?);
    } else {
        for line in output::format_item_detail(item, &list) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_watch() -> CmdResult {
    let root = locate()?;
    let (config, _) = load(&root)?;
    let path = document::list_path(&root, &config);

    let watcher = ListWatcher::start(&path)?;
    render_watch(&path);

    loop {
        if !watcher.poll().is_empty() {
            println!();
            render_watch(&path);
        }
        std::thread::sleep(Duration::from_millis(200));
    }
}

/// Render the current document; a transiently unreadable document keeps
/// the previous render on screen.
fn render_watch(path: &Path) {
    match document::load_list(path) {
        Ok(list) => {
            let sections = build_sections(&list.items, &list.stores);
            for line in output::format_sections(&sections) {
                println!("{}", line);
            }
        }
        Err(e) => warn!(error = %e, "skipping render, document unreadable"),
    }
}
