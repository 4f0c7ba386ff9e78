// RustPixel
// copyright zipxing@hotmail.com 2022~2024

//! Log module provides log init and a one-shot logger, reference
//! https://docs.rs/log4rs

use crate::config::Draw2dConfig;
use crate::error::{DrawError, DrawResult};
#[cfg(feature = "log4rs")]
use crate::util::get_abs_path;
use log::LevelFilter;
use std::collections::HashSet;

#[cfg(feature = "log4rs")]
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// init logs system
#[cfg(feature = "log4rs")]
pub fn init_log(level: LevelFilter, file_path: &str) -> Result<(), String> {
    let fpstr = get_abs_path(file_path);
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(&fpstr)
        .map_err(|e| format!("log file {} error: {}", fpstr, e))?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| e.to_string())?;
    log4rs::init_config(config).map_err(|e| e.to_string())?;
    Ok(())
}

/// without log4rs the host application installs its own logger
#[cfg(not(feature = "log4rs"))]
pub fn init_log(level: LevelFilter, _file_path: &str) -> Result<(), String> {
    log::set_max_level(level);
    Ok(())
}

/// init logs with the level and file named in the config
pub fn init_log_from(cfg: &Draw2dConfig) -> DrawResult<()> {
    let level = cfg.level_filter()?;
    init_log(level, &cfg.log_file).map_err(DrawError::Config)
}

/// Logs a message only the first time a call site reports it.
///
/// Keys are static call-site names, e.g. "draw_char.no_conchars".
/// Lives inside the draw context, so a fresh context logs again.
#[derive(Debug, Default)]
pub struct OnceLog {
    shown: HashSet<&'static str>,
}

impl OnceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// returns true when the key had not been seen before
    pub fn first(&mut self, key: &'static str) -> bool {
        self.shown.insert(key)
    }

    pub fn warn(&mut self, key: &'static str, msg: &str) {
        if self.first(key) {
            log::warn!("{}: {}", key, msg);
        }
    }

    pub fn info(&mut self, key: &'static str, msg: &str) {
        if self.first(key) {
            log::info!("{}: {}", key, msg);
        }
    }

    pub fn reset(&mut self) {
        self.shown.clear();
    }
}
