mod common;
mod delimiter;
mod dispatch;
mod engine;
pub mod errors;
mod input;
mod logging;
mod menu;
mod preview;
mod runner;
mod scan;
mod sheets;
mod table;

pub use common::FileKind;
pub use dispatch::load_table;
pub use errors::{CrossbowError, CrossbowResult};
pub use engine::{ArrowEngine, ReadOptions, TabularEngine};
pub use input::{Choice, LineSource};
pub use preview::Preview;
pub use runner::{CrossbowOptions, Outcome, Session, run_crossbow, run_crossbow_with_options};
pub use table::Table;
