//! Link management commands

mod add;
mod info;
mod list;
mod remove;

pub use add::add_link;
pub use info::link_info;
pub use list::list_links;
pub use remove::remove_link;
