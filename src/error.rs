//! # 统一错误处理模块
//!
//! 定义 imgres 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// imgres 统一错误类型
#[derive(Error, Debug)]
pub enum ImgresError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Failed to read directory: {path}: {source}")]
    DirectoryReadError {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to write log file: {path}: {source}")]
    LogFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read confirmation answer: {0}")]
    PromptError(#[source] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Unexpected probe output for {path}: '{output}'")]
    ProbeOutput { path: String, output: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ImgresError>;
