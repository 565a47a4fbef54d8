//! Request/response DTO types for all services.

pub mod math_dto;
pub mod message_dto;
pub mod notify_dto;

pub use math_dto::{CalcResponse, MulResponse, RawOperands, SumResponse};
pub use message_dto::{MessageRequest, MessageResponse};
pub use notify_dto::{NotifyRequest, NotifyResponse};
