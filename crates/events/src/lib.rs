//! Outbound notifications for sidemate.
//!
//! - [`email`] -- SMTP delivery through `lettre`.
//! - [`notice`] -- the messages the platform sends (contact forwarding,
//!   account deletion confirmation).
//!
//! Delivery is always best-effort from the caller's point of view: the API
//! logs a failed send and still answers the request.

pub mod email;
pub mod notice;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use notice::Notice;
