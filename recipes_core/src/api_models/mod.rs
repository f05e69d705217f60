mod categories;
mod forms;
mod health;
mod login;
mod pagination;
mod recipes;
mod view;

pub use categories::*;
pub use forms::*;
pub use health::*;
pub use login::*;
pub use pagination::*;
pub use recipes::*;
pub use view::*;
