// Domain layer - Core business logic

pub mod editor;
pub mod errors;
pub mod mapper;
pub mod model;
pub mod rules;
pub mod store;
