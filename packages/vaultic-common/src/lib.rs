pub mod digest;
pub mod window;

pub use digest::ticket_digest;
pub use window::{TimeWindow, WindowError};
