pub mod audio_probe;
pub mod event_bus;
pub mod message_repository;
pub mod session_repository;
pub mod task_spawner;
pub mod ticket_repository;
pub mod time_service;
