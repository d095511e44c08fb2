// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config storage for physim tools: a storage port, a JSON service over it,
//! and a filesystem adapter.
#![forbid(unsafe_code)]

pub mod config;
mod fs;

pub use config::{
    load_scene_config, save_scene_config, ConfigError, ConfigService, ConfigStore,
    SCENE_CONFIG_KEY,
};
pub use fs::FsConfigStore;
