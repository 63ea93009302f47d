//! Adapter implementations of the domain ports: slot persistence (memory
//! and file backed), the simulated feed endpoint, and first-run seed data.

pub mod feed;
pub mod local;
pub mod memory;
pub mod seed;

pub use feed::SimulatedFeedBackend;
pub use local::FileSlotStore;
pub use memory::MemorySlotStore;
