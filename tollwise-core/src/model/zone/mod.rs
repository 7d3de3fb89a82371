mod error;
mod id;
mod registry;
mod registry_config;
mod zone;

pub use error::ZoneError;
pub use id::ZoneId;
pub use registry::ZoneRegistry;
pub use registry_config::ZoneRegistryConfig;
pub use zone::Zone;
