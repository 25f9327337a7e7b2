mod basis;
mod channels;
pub mod errors;
mod measurements;
mod random;
mod stage;

pub use basis::Basis;
pub use channels::{Interception, QuantumChannel, Transmission};
pub use measurements::{measure, measure_all};
pub use random::RandomSource;
pub use stage::Stage;
