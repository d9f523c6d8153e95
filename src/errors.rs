use thiserror::Error;

/// 外围错误：配置读取、文件读取和 JSON 输出
///
/// 分类过程本身从不失败，异常情况都以数据形式写在 `Line` 和 `ParseOutput` 里。
#[derive(Error, Debug)]
pub enum FountainError {
    #[error("IO错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("无效的配置: {0}")]
    Config(String),
}

pub type FountainResult<T> = Result<T, FountainError>;
