pub mod constants;
pub mod errors;
pub mod inputs;
pub mod variant;

pub use constants::*;
pub use errors::*;
pub use inputs::*;
pub use variant::*;
