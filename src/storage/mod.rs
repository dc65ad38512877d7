//! Local storage for the Akiba client
//!
//! The API owns all financial data; the only thing kept on disk is the auth
//! session. Writes are atomic so a crash never leaves a half-written file.

pub mod file_io;
pub mod session;

pub use file_io::{read_json_optional, remove_if_exists, write_json_atomic};
pub use session::SessionStore;
