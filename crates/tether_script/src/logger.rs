//! Script logging facade
//!
//! Forwards to the engine's log sink. Messages are passed as borrowed
//! strings; the engine formats and routes them.

use crate::marshal;

pub struct Logger;

impl Logger {
    pub fn trace(message: &str) {
        marshal::call(|calls| calls.logger_trace(message));
    }

    pub fn info(message: &str) {
        marshal::call(|calls| calls.logger_info(message));
    }

    pub fn warn(message: &str) {
        marshal::call(|calls| calls.logger_warn(message));
    }

    pub fn error(message: &str) {
        marshal::call(|calls| calls.logger_error(message));
    }

    pub fn critical(message: &str) {
        marshal::call(|calls| calls.logger_critical(message));
    }

    /// Write a raw line with no level or formatting.
    pub fn cout(message: &str) {
        marshal::call(|calls| calls.logger_cout(message));
    }
}
