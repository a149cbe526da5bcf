//! Business services for the SmsGate core.

pub mod sms;

pub use sms::{
    AuditLogger, Clock, CodeMessage, CodeStorage, DeliveryStatus, DispatchError, GatewayResult,
    MessageData, SendRecord, SmsConfig, SmsDispatcher, SmsService, SystemClock,
};
