mod cell;
mod error;
mod grid;
mod records;
mod rules;

pub use cell::{Cell, CellId, CellState, Coord};
pub use error::{GridError, InvalidArgument};
pub use grid::{BoardSize, Grid, validate_cell_size};
pub use records::{CellOutcome, CellRecord, CellSnapshot, CellUpdate};
pub use rules::{ConwayRule, HighLifeRule, Rule, all_rules, default_rule, rule_by_name};
