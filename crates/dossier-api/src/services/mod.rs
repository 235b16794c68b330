//! Business services used by the HTTP handlers

pub mod file_service;

pub use file_service::FileService;
