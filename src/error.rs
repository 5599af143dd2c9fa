use std::io;

use thiserror::Error;

/// worklogの読み書きで発生するエラー。
///
/// 内容の誤りはエラーにならず、入出力の失敗だけを表す。
#[derive(Debug, Error)]
pub enum WorklogError {
    #[error("read line: {0}")]
    Read(#[source] io::Error),

    #[error("write {context}: {source}")]
    Write {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl WorklogError {
    pub(crate) fn write(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Write { context, source }
    }
}
