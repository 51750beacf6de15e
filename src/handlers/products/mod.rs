mod catalog;
mod count;
mod create;
mod delete;
mod featured;
mod form;
mod list;
mod show;
mod update;

pub use catalog::catalog;
pub use count::count;
pub use create::create;
pub use delete::delete;
pub use featured::featured;
pub use list::list;
pub use show::show;
pub use update::update;
