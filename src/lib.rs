//! dentreg - registration wizard for dental clinics and job seekers
//! Copyright Cybex B.V.
//!
//! The library holds everything that does not touch the terminal:
//! - `wizard` - step sequencing, field schemas and the controller
//! - `sink` - where finished registrations are sent
//! - `answers` - batch answers files for non-interactive submission
//! - `config`, `paths`, `constants` - ambient settings

pub mod answers;
pub mod config;
pub mod constants;
pub mod paths;
pub mod sink;
pub mod wizard;
