pub mod auth;
pub mod router;
pub mod session;
pub mod shell;
pub mod subsystems;

pub use session::{Counts, Session};
