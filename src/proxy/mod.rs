//! Request forwarding and response normalization.
//!
//! # Data Flow
//! ```text
//! RouteMatch + inbound body/cookies
//!     → forwarder.rs (ForwardRequest → outbound call → ForwardOutcome)
//!     → normalize.rs (success pass-through | error envelope)
//!       or login.rs  (normalize + Authorization cookie re-issue)
//!     → response.rs (GatewayResponse → axum Response)
//! ```
//!
//! # Design Decisions
//! - Backend failures never escape as errors; they become envelopes
//! - Response cookies are only read by the login flow
//! - Payloads pass through unchanged in shape

pub mod cookies;
pub mod forwarder;
pub mod login;
pub mod normalize;
pub mod response;

pub use cookies::CookieMap;
pub use forwarder::{ForwardError, ForwardMethod, ForwardOutcome, ForwardRequest, Forwarder};
pub use response::{GatewayResponse, SetCookie};
