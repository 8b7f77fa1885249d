//! Enumerations and field types for task management.
//!
//! Status and priority are closed sets. Anything that arrives as free text
//! (CSV rows, hand-edited JSON) is parsed into these types at the boundary, so an
//! unknown value can never reach the reporting code.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task completion status.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[serde(alias = "Done")]
    Done,
    #[serde(alias = "Pending")]
    Pending,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Done, Status::Pending];
}

/// Priority classification for task importance.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Priority {
    /// Most important first, the order reports are printed in.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}
