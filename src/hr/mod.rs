//! Operations on Odoo's HR models.

pub mod attendance;
pub mod employee;
