//! Settings, module lifecycle, and registry shared by the Concierge services.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use settings::{ServiceKind, Settings};
