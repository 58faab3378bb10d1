// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Options for the hull builder, loadable from RON
pub mod config;
pub use config::*;

/// Faces of the hull and their per-face bookkeeping
pub mod face_registry;
pub use face_registry::*;

/// The quickhull driver
pub mod quickhull;
pub use quickhull::*;

/// Structural and geometric checks on built hulls
pub mod validation;
pub use validation::{validate_containment, validate_hull};
