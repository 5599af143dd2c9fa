use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// 指定回数に応じたログレベルを返す。
pub fn level(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// 標準エラー出力へのロガーを設定する。
///
/// 標準出力はコマンドの出力に使うため、ログは全て標準エラー出力に書き出す。
pub fn init(verbosity: u64) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level(verbosity))
        .chain(std::io::stderr())
        .apply()
        .context("Failed to initialize logger")
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;
    use rstest::rstest;

    use super::level;

    #[rstest]
    #[case::default(0, LevelFilter::Warn)]
    #[case::verbose(1, LevelFilter::Info)]
    #[case::very_verbose(2, LevelFilter::Debug)]
    #[case::more(5, LevelFilter::Debug)]
    fn test_level(#[case] verbosity: u64, #[case] expected: LevelFilter) {
        assert_eq!(level(verbosity), expected);
    }
}
