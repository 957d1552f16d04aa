pub mod bill;
pub mod chat_history;
pub mod demographics;
pub mod user;
