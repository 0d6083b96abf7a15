//! Checked-in protobuf/tonic code for the recommendation RPC surface.
//!
//! The `.tonic.rs` files under `gen/` are generated output; regenerate from
//! `proto/` rather than editing by hand. `descriptor` rebuilds the file
//! descriptor set programmatically for the gRPC reflection service.

pub mod descriptor;
mod gen;

pub use gen::recommendation;
