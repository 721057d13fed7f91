#![no_std]

extern crate alloc;

pub use answer::*;
pub use error::*;
pub use mask::*;
pub use puzzle::*;
pub use session::*;
pub use store::*;

mod answer;
mod error;
mod mask;
mod puzzle;
mod session;
mod store;
