pub mod cli;
pub mod scenario;
pub mod script;
pub mod stress;
// Re-export the container for binaries and integration tests.
pub use my_vector;
