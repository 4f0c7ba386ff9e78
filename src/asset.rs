// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Asset module provides the raw resource manager.
//! Files are read once, relative to the asset root, and kept as bytes.
//! Hosts that ship assets some other way (packed files, wasm fetch, tests)
//! push the bytes in with set_data before anything asks for them.

use crate::config::Draw2dConfig;
use crate::error::{DrawError, DrawResult};
use crate::util::{get_abs_path, join_asset_path};
use log::info;
use std::collections::HashMap;

pub struct AssetManager {
    root: String,
    // game path -> raw file data
    assets: HashMap<String, Vec<u8>>,
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new(".")
    }
}

impl AssetManager {
    pub fn new(root: &str) -> Self {
        Self {
            root: get_abs_path(root),
            assets: HashMap::new(),
        }
    }

    /// manager rooted at `cfg.asset_root`
    pub fn from_config(cfg: &Draw2dConfig) -> Self {
        let am = Self::new(&cfg.asset_root);
        info!("asset root:{}", am.root());
        am
    }

    /// manager that never touches the filesystem, data comes from set_data
    pub fn in_memory() -> Self {
        Self {
            root: String::new(),
            assets: HashMap::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the bytes of `loc`, reading the file on first use.
    pub fn load(&mut self, loc: &str) -> DrawResult<&[u8]> {
        if !self.assets.contains_key(loc) {
            if self.root.is_empty() {
                return Err(DrawError::Asset {
                    path: loc.to_string(),
                    reason: "not preloaded".to_string(),
                });
            }
            let fpath = join_asset_path(&self.root, loc);
            let fdata = std::fs::read(&fpath).map_err(|e| DrawError::Asset {
                path: fpath.to_string_lossy().into_owned(),
                reason: e.to_string(),
            })?;
            info!("asset load:{:?} {} bytes", fpath, fdata.len());
            self.assets.insert(loc.to_string(), fdata);
        }
        Ok(self.assets.get(loc).map(|v| &v[..]).unwrap_or_default())
    }

    pub fn get(&self, loc: &str) -> Option<&[u8]> {
        self.assets.get(loc).map(|v| &v[..])
    }

    pub fn set_data(&mut self, loc: &str, data: &[u8]) {
        self.assets.insert(loc.to_string(), data.to_vec());
    }

    pub fn unload(&mut self, loc: &str) -> bool {
        self.assets.remove(loc).is_some()
    }
}
