// Student API: profile, suggestions, applications, resume upload.
// Matching goes through crate::matching only.

pub mod completion;
pub mod handlers;
pub mod service;
