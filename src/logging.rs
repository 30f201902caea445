//! Logger for the binary. The library never logs from its validators; only
//! batch processing and the CLI emit records.
//!
//! `IBANCHECK_LOG_LEVEL` (or `RUST_LOG`) takes a default level plus optional
//! per-target overrides, e.g. `warn,ibancheck::batch=debug`. Each `-v` on
//! the command line raises the default by one level. `IBANCHECK_LOG_DIR`
//! adds a daily log file.

use chrono::Local;
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Once;

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogConfig {
    default: LevelFilter,
    targets: Vec<(String, LevelFilter)>,
    dir: Option<PathBuf>,
}

impl LogConfig {
    fn from_env(verbose: u8) -> Self {
        let spec = std::env::var("IBANCHECK_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_default();
        let (default, targets) = parse_level_spec(&spec);
        let dir = match std::env::var("IBANCHECK_LOG_DIR").ok().as_deref() {
            None | Some("off") | Some("none") | Some("") => None,
            Some(path) => Some(PathBuf::from(path)),
        };
        Self {
            default: raise(default, verbose),
            targets,
            dir,
        }
    }
}

pub fn init_logging(app_name: &str, verbose: u8) -> Result<(), String> {
    let mut init_result: Result<(), String> = Ok(());
    INIT.call_once(|| {
        init_result = install(app_name, LogConfig::from_env(verbose));
    });
    init_result
}

fn install(app_name: &str, config: LogConfig) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new().level(config.default);
    for (target, level) in config.targets {
        dispatch = dispatch.level_for(target, level);
    }

    // Results go to stdout; log records stay on stderr.
    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{:<5} | {}", record.level(), message))
        })
        .chain(std::io::stderr());
    dispatch = dispatch.chain(console);

    if let Some(dir) = config.dir {
        std::fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let date = Local::now().format("%Y_%m_%d");
        let file_path = dir.join(format!("{app_name}-{date}.log"));
        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} | {:<5} | {} | {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .chain(fern::log_file(file_path).map_err(|err| err.to_string())?);
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().map_err(|err| err.to_string())
}

/// Parse `level[,target=level]*`. Unknown or empty pieces are ignored; the
/// default level falls back to `info`.
fn parse_level_spec(spec: &str) -> (LevelFilter, Vec<(String, LevelFilter)>) {
    let mut default = LevelFilter::Info;
    let mut targets = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part.split_once('=') {
            Some((target, level)) => {
                if let Ok(level) = level.trim().parse::<LevelFilter>() {
                    targets.push((target.trim().to_string(), level));
                }
            }
            None => {
                if let Ok(level) = part.parse::<LevelFilter>() {
                    default = level;
                }
            }
        }
    }
    (default, targets)
}

fn raise(level: LevelFilter, steps: u8) -> LevelFilter {
    let mut level = level;
    for _ in 0..steps {
        level = match level {
            LevelFilter::Off => LevelFilter::Error,
            LevelFilter::Error => LevelFilter::Warn,
            LevelFilter::Warn => LevelFilter::Info,
            LevelFilter::Info => LevelFilter::Debug,
            LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
        };
    }
    level
}
