pub mod routes;
pub mod schedule_dto;
pub mod schedule_handlers;
pub mod schedule_models;
pub mod schedule_repository;
pub mod schedule_service;

pub use schedule_dto::{CreateScheduleRequest, MessageResponse, UpdateScheduleRequest};
pub use schedule_models::{Priority, Schedule};
pub use schedule_repository::ScheduleRepository;
pub use schedule_service::ScheduleService;
