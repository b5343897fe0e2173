
mod builder;
mod items;
mod types;
mod table;

pub use table::{Action, LrTable, ParseTable, State};
