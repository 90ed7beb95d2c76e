pub mod estate_handlers;
pub mod estate_models;
pub mod estate_service;

pub use estate_service::EstateService;
