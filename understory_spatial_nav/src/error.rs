// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by the management API.
//!
//! Navigation outcomes (no candidate, a blocked exit, a vetoed transition) are
//! not errors; they are reported as `false` plus a `navigatefailed`
//! notification where applicable.

use crate::section::SectionId;

/// Misuse of the management API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A section with this id is already registered.
    #[error("section \"{0}\" already exists")]
    DuplicateSection(SectionId),
    /// No section with this id is registered.
    #[error("section \"{0}\" doesn't exist")]
    UnknownSection(SectionId),
    /// An operation required a section id and got an empty one.
    #[error("a section id is required")]
    MissingSectionId,
}
