// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Path helpers used by the asset loader and log setup.

use std::{
    env,
    fs::read_dir,
    io::{self, ErrorKind},
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

/// get flag_file path...
pub fn get_project_root(flag_file: &str) -> io::Result<PathBuf> {
    let path = env::current_dir()?;
    for p in path.as_path().ancestors() {
        let mut entries = read_dir(p)?;
        let has_flag = entries.any(|e| e.map(|e| e.file_name() == *flag_file).unwrap_or(false));
        if has_flag {
            return Ok(PathBuf::from(p));
        }
    }
    Err(io::Error::new(
        ErrorKind::NotFound,
        "Ran out of places to find flag_file",
    ))
}

/// Root used for relative paths: the nearest directory holding a Cargo.lock,
/// so a deployed binary can ship with a Cargo.lock next to its assets folder.
pub fn get_root_path() -> String {
    match get_project_root("Cargo.lock") {
        Ok(p) => p.to_string_lossy().into_owned(),
        Err(_e) => ".".to_string(),
    }
}

pub fn get_abs_path(fpath: &str) -> String {
    if Path::new(fpath).is_relative() {
        format!("{}{}{}", get_root_path(), MAIN_SEPARATOR, fpath)
    } else {
        fpath.to_string()
    }
}

/// Joins a game path like "pics/colormap.pcx" onto an asset root.
/// Game paths always use '/', the root may use the platform separator.
pub fn join_asset_path(root: &str, loc: &str) -> PathBuf {
    let mut p = PathBuf::from(root);
    for part in loc.split(['/', '\\']).filter(|s| !s.is_empty()) {
        p.push(part);
    }
    p
}
