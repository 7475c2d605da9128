mod book;
mod user;

pub use book::*;
pub use user::*;

pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";
