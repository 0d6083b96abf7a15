// @generated
// This file wires up generated protobuf code
// Note: The prost files already include!() the tonic files automatically

pub mod recommendation {
    include!("recommendation.v1.rs");
    // recommendation.v1.tonic.rs is auto-included by recommendation.v1.rs
}
