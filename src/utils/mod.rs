//! # 工具函数模块
//!
//! 提供美化输出（含日志文件）、交互确认、进度提示等工具。
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/` 模块使用
//! - 子模块: output, progress, prompt

pub mod output;
pub mod progress;
pub mod prompt;
