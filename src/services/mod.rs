// BookmarkHub services
// Configuration, logging setup and the user settings service.

pub mod config;
pub mod logging;
pub mod settings_service;
