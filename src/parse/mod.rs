pub mod entry;
pub mod quantity;

pub use entry::{ParsedEntry, parse_entry};
pub use quantity::{ParsedQuantity, format_amount, parse_quantity, units_match};
