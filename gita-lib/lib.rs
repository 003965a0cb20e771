pub mod config;
pub mod decorate;
pub mod document;
pub mod history;
pub mod logger;
pub mod selection;
pub mod upload;
