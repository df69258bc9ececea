pub mod error;
pub mod types;
pub mod validation;

pub use error::{GridError, Result};
pub use types::{PermissionKey, Permissions, Record, RecordId, Role, Status};
pub use validation::{NewRecord, ValidationErrors};
