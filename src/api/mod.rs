pub mod health;
pub mod messages;
pub mod movies;
pub mod payments;
pub mod swagger;
pub mod users;
