pub mod analyze;
pub mod bills;
pub mod chatbot;
pub mod debug;
pub mod demographics;
pub mod health;
