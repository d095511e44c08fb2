// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Buffer files and stored settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use physim_config::{load_scene_config, ConfigService, FsConfigStore};
use physim_core::wire::{bytes_to_words, words_to_bytes};
use physim_core::SceneConfig;

pub fn read_words(path: &Path) -> Result<Vec<u32>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    bytes_to_words(&bytes).with_context(|| format!("{} is not a word buffer", path.display()))
}

pub fn write_words(path: &Path, words: &[u32]) -> Result<()> {
    fs::write(path, words_to_bytes(words))
        .with_context(|| format!("failed to write {}", path.display()))
}

pub fn scene_config(config_dir: Option<&Path>) -> Result<SceneConfig> {
    let store = match config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    }
    .context("failed to open config store")?;
    load_scene_config(&ConfigService::new(store)).context("failed to load scene config")
}
