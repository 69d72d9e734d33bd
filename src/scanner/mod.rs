//! Installation discovery: filesystem traversal plus candidate verification.

pub mod verify;
pub mod walker;

pub use verify::{major_version_of, parse_banner, verify, verify_with_timeout, VerifyError};
pub use walker::{collect_candidates, default_scan_roots, scan, Candidate};
