//! Rate limit information for GitHub API responses.
//!
//! Every gateway response carries `x-ratelimit-*` headers. They are captured
//! alongside API errors so that a `403` caused by an exhausted quota can be
//! reported differently from a permission failure.

mod info;

pub use info::RateLimitInfo;
