mod confirmation;
mod hasher;
mod roles;
mod token;

pub use confirmation::*;
pub use hasher::*;
pub use roles::*;
pub use token::*;
