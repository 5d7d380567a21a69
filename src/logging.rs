use std::ops::Deref;
use std::panic;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Level for a `-v` count: info by default, `-v` debug, `-vv` and up trace
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Log to `path`; the terminal belongs to the game so nothing goes to stderr
pub fn setup(path: &Path, level: LevelFilter) -> Result<()> {
    panic::set_hook(Box::new(|panic_info| {
        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));

        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref);

        let cause = cause.unwrap_or_else(|| {
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .unwrap_or("<cause unknown>")
        });

        log::error!("A panic occurred at {}:{}: {}", filename, line, cause);
    }));

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{l} {d(%H:%M:%S.%3f)} {f}:{L} {m}{n}",
        )))
        .build(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("file-appender", Box::new(file_appender)))
        .build(Root::builder().appender("file-appender").build(level))
        .context("Failed to build logging config")?;

    log4rs::init_config(config).context("Failed to install logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), LevelFilter::Info);
        assert_eq!(level_for(1), LevelFilter::Debug);
        assert_eq!(level_for(2), LevelFilter::Trace);
        assert_eq!(level_for(7), LevelFilter::Trace);
    }
}
