pub mod account;
pub mod chat;
pub mod document;
pub mod plan;
