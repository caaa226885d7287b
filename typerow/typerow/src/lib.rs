mod error;
mod reflector;

pub use error::ReflectorError;
pub use reflector::{Reflector, ReflectorBuilder};
#[cfg(feature = "arrow")]
pub use typerow_arrow as arrow;
pub use typerow_core as core;
pub use typerow_core::reflect_record;
