mod category;
mod recipe;
mod user;
mod user_role;

pub use category::*;
pub use recipe::*;
pub use user::*;
pub use user_role::*;
