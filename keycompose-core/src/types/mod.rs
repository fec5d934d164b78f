pub mod key_code;
pub mod layout;
pub mod transform;

pub use key_code::*;
pub use layout::*;
pub use transform::*;
