//! HTTP handlers. Boundary mapping only: requests are translated into
//! service calls and service results into response envelopes.

pub mod orders;
