//! Sporktris (workspace facade crate).
//!
//! Re-exports the member crates under `sporktris::{core,engine,input,term,types}`;
//! the implementation lives in dedicated crates under `crates/`.

pub use sporktris_core as core;
pub use sporktris_engine as engine;
pub use sporktris_input as input;
pub use sporktris_term as term;
pub use sporktris_types as types;
