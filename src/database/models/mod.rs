mod account;
mod document;
mod user;

pub use account::Account;
pub use document::Document;
pub use user::User;
