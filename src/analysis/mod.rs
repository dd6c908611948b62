//! Classification and scoring
//!
//! - Singing gate (indicator vote)
//! - Free-form parameter scoring
//! - Grade bands
//! - Result types

pub mod gate;
pub mod grade;
pub mod result;
pub mod scoring;
