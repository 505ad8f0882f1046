pub mod message_service;
pub mod movie_service;
pub mod payment_service;
pub mod token_service;
pub mod user_service;
