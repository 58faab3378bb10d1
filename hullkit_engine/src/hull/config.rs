// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// How the first points of the initial tetrahedron are told apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InitialSimplexStrategy {
    /// The second point is the first one whose (x, y) differs from the first
    /// point, and the third one is the first not collinear with them when
    /// projected on the XY plane. This is a weak distinctness test: two
    /// points that only differ in z count as the same point. Degenerate
    /// inputs are still detected, because every point then lies on the
    /// vertical plane (or line) through the first two.
    PlanarProjection,
    /// Same scan, but in 3D: the second point must be farther than `epsilon`
    /// from the first, the third farther than `epsilon` from the line through
    /// them, and the fourth farther than `epsilon` from their plane.
    Spatial { epsilon: f64 },
}

impl Default for InitialSimplexStrategy {
    fn default() -> Self {
        Self::PlanarProjection
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickhullConfig {
    pub initial_simplex: InitialSimplexStrategy,
    /// Runs the manifold checks after every iteration, panicking on the first
    /// violation. Slow, meant for debugging.
    pub validate_each_step: bool,
}

impl Default for QuickhullConfig {
    fn default() -> Self {
        Self {
            initial_simplex: InitialSimplexStrategy::default(),
            validate_each_step: false,
        }
    }
}

impl QuickhullConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).context("Invalid quickhull config")
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = std::io::BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("Could not open config at {}", path.display()))?,
        );
        ron::de::from_reader(reader)
            .with_context(|| format!("Invalid quickhull config at {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        ron::ser::to_writer_pretty(writer, self, ron::ser::PrettyConfig::default())?;
        Ok(())
    }
}
