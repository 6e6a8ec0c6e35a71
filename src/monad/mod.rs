//! Result-state monads for composing agent steps
//!
//! - `AgentMonad` - synchronous container pairing a state with a value or an error
//! - `AsyncAgentMonad` - deferred async chain with concurrent `gather`
//! - `gather_sync` / `gather_sync_with` - fan-in of already-completed monads

pub mod async_monad;
pub mod gather;
pub mod sync;

pub use async_monad::AsyncAgentMonad;
pub use gather::{gather_sync, gather_sync_with};
pub use sync::{AgentMonad, Outcome};
