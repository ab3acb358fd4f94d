pub mod anim;
pub mod error;
pub mod extract;
pub mod montage;
pub mod rect;

pub use error::{Error, Result};
