//! Host APIs for system interactions.
//!
//! These are the two seams of the fetcher that touch the outside world:
//!
//! - [`http`] - Sends one GET request and returns status and body
//! - [`sleep`] - Waits between attempts
//!
//! Both are traits so tests can script responses and record pauses
//! without a network or wall-clock time.

pub mod http;
pub mod sleep;

pub use http::{HttpTransport, RawResponse, Transport};
pub use sleep::{Pause, Sleeper, TokioSleeper};
