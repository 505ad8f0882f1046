pub mod message;
pub mod movie;
pub mod user;

pub use message::*;
pub use movie::*;
pub use user::*;
