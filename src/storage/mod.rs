pub mod source;
pub mod store;

pub use source::{DEPARTMENTS, MockRecordSource, RecordSource};
pub use store::{Collection, EntityStore};
