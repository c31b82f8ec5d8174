pub mod input;
pub mod masked_input;

pub use input::Input;
pub use masked_input::MaskedInput;
