//! Support code for the `blockport` binary.
//!
//! - [`documents`]: reading input JSON, detecting which format it holds, and
//!   running the configured conversion.

pub mod documents;
