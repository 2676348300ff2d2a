//! Transport-free business rules for the question-bank portal.
//!
//! `scoring` owns the OSCE total-marks computation and consistency checks;
//! `policy` owns the role-aware create/update/delete decisions for writer
//! content. Both are pure and testable without a database or HTTP layer.

pub mod policy;
pub mod scoring;
