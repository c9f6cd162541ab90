pub mod events;
pub mod memory;

pub use events::TracingEventSink;
pub use memory::MemoryTransactionStore;
