//! # matcha-service
//!
//! Application layer containing the match engine, notification fan-out,
//! the remaining use cases, and the request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, BlockService, ChatService, MatchService, MessageService, NotificationService,
    ProfileService, ReportService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, StatusService, SwipeService, TagService, UserService, ViewService,
};
