//! Persistence of the monthly income/expense log.
//!
//! The calculation engine never touches storage. Callers load a
//! [`MonthlyLog`], turn it into inputs, and save it back after editing.
//! The HTTP layer holds a store behind `Arc<dyn MonthlyLogStore>`.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::MonthlyLog;

/// A place the monthly log is kept between sessions.
///
/// `load` returns the empty log when nothing has been saved yet.
pub trait MonthlyLogStore: Send + Sync {
    /// Loads the saved log, or the empty log if none exists.
    fn load(&self) -> EngineResult<MonthlyLog>;

    /// Replaces the saved log.
    fn save(&self, log: &MonthlyLog) -> EngineResult<()>;
}
