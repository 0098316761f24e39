//! Domain core for the Serendib vendor platform.
//!
//! Pure, I/O-free model of the field-level edit/approval workflow:
//! typed field schemas, lockable form sessions, change-set diffing,
//! update-request lifecycle, and the derived pending-value index.

pub mod chat;
pub mod diff;
pub mod error;
pub mod fields;
pub mod lock;
pub mod pending;
pub mod record;
pub mod roles;
pub mod session;
pub mod types;
pub mod update_request;
pub mod value;
pub mod wizard;

pub use error::{CoreError, CoreResult};
