//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: resize

pub mod resize;

use clap::Parser;

/// imgres - 按最大边批量缩放图像
#[derive(Parser, Debug)]
#[command(name = "imgres")]
#[command(author = "Frantisek Hajnovic")]
#[command(version)]
#[command(about = "Resize images so the greater of their dimensions is at most the given limit")]
#[command(
    long_about = "Resizes all the images whose path matches the given (case-insensitive) regex \
                  pattern so that the greater of the two dimensions is at most as specified. \
                  Uses the \"convert\" utility of the ImageMagick suite, which must be installed."
)]
pub struct Cli {
    #[command(flatten)]
    pub resize: resize::ResizeArgs,
}
