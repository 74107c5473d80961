//! Top-level facade crate for taxoscope.
//!
//! Re-exports the core taxonomy types and the server library so users can depend on a single crate.

pub mod core {
    pub use taxoscope_core::*;
}

pub mod server {
    pub use taxoscope_server::*;
}
