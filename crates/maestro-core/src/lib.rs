// Core subsystems
pub mod extension;
pub mod kernel;
pub mod memory;
pub mod settings;

// Re-export key public types/traits for easier use by the binary and
// embedding applications.
pub use kernel::Core;
pub use kernel::error::Error as KernelError;
pub use extension::{ExtensionDescriptor, ExtensionManager, ExtensionRegistry};
pub use memory::MemoryStore;
