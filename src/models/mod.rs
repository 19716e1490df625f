//! # 数据模型模块
//!
//! 定义图像尺寸与文件夹批次的核心数据结构。
//!
//! ## 依赖关系
//! - 被 `batch/`, `tools/` 使用
//! - 子模块: batch, image

pub mod batch;
pub mod image;

pub use batch::FolderBatch;
pub use image::{Axis, Dimensions, ResizeDecision};
