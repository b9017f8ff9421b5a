//! mab-core: shared types for statement extraction and balance analytics

pub mod error;
pub mod events;
pub mod money;
pub mod month;
pub mod transaction;

pub use error::{Error, Result};
pub use events::{EventSink, MemorySink, NullSink, ParseEvent, TracingSink};
pub use money::{Currency, round1, round2};
pub use month::MonthKey;
pub use transaction::{Movement, Transaction, TransactionRecord};
