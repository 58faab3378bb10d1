// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Point conversion, lexicographic ordering and the orientation predicates
/// consumed by the hull builder.
pub mod math;

/// Small collection helpers shared across crates.
pub mod utils;
