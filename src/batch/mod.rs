//! # 批量处理模块
//!
//! 按文件夹分组收集图像，并逐个文件夹顺序缩放。
//!
//! ## 功能
//! - 收集匹配文件并按文件夹分组
//! - 探测尺寸、确认、缩放
//! - 失败计数与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/resize.rs` 使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `tools::ImageTool` 调用外部程序

pub mod collector;
pub mod runner;

pub use collector::FolderCollector;
pub use runner::{BatchRunner, RunOutcome, RunSummary};
