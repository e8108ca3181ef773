pub mod date;
pub mod entry;
pub mod item;

pub use date::{format_date, parse_date, Clock, FixedClock, SystemClock};
pub use entry::{DailyEntry, MAX_ITEMS_PER_DAY};
pub use item::{EntryItem, MAX_ITEM_CHARS};
