//! # 外部图像工具模块
//!
//! 尺寸探测与原地缩放都委托给外部程序，这里定义统一接口。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/resize.rs` 使用
//! - 使用 `models/image.rs`
//! - 子模块: magick

pub mod magick;

pub use magick::MagickTool;

use crate::error::Result;
use crate::models::{Axis, Dimensions};

use std::path::Path;

/// 图像探测与缩放接口
pub trait ImageTool {
    /// 读取图像的像素尺寸，不修改文件
    fn probe(&self, path: &Path) -> Result<Dimensions>;

    /// 将 `axis` 约束为 `limit` 像素并保持宽高比，结果覆盖原文件
    fn resize(&self, path: &Path, limit: u32, axis: Axis) -> Result<()>;
}
