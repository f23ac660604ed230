//! API response shaping
//!
//! Maps Put/Delete outcomes onto the uniform `{ok, id, message?}` wire
//! shape shared by both operations.

mod response;

pub use response::WriteAck;
