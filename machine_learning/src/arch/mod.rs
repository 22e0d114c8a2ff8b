pub mod activations;
pub mod layers;
pub mod loss;
mod sequential;
mod snapshot;

pub use sequential::Sequential;
pub use snapshot::SNAPSHOT_VERSION;
