//! Infrastructure layer: I/O implementations and the application context
//!
//! This layer implements I/O boundary traits and wires up the context.

pub mod di;
pub mod traits;

pub use di::AppContext;
pub use traits::{StdinTerminal, Terminal};
