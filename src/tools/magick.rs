//! # ImageMagick 调用
//!
//! 通过 `convert`（或 `magick`）完成尺寸探测与原地缩放。
//!
//! ## 功能
//! - 探测: `convert <file> -print "%wx%h\n" null:`
//! - 缩放: `convert <file> -resize <L>x|x<L> <file>`
//!
//! 参数以数组形式传给子进程，不经过 shell。
//!
//! ## 依赖关系
//! - 实现 `tools::ImageTool`
//! - 使用 `models/image.rs`

use super::ImageTool;
use crate::error::{ImgresError, Result};
use crate::models::{Axis, Dimensions};

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::Command;

/// 默认的 ImageMagick 可执行文件
pub const DEFAULT_CONVERT: &str = "convert";

/// ImageMagick 外部工具
#[derive(Debug, Clone)]
pub struct MagickTool {
    program: String,
}

impl MagickTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 执行外部命令，非零退出码视为失败
    fn run(&self, args: &[&OsStr]) -> Result<String> {
        let command_line = self.command_line(args);
        tracing::debug!(command = %command_line, "running converter");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ImgresError::CommandNotFound {
                    command: self.program.clone(),
                },
                _ => ImgresError::CommandFailed {
                    command: command_line.clone(),
                    stderr: e.to_string(),
                },
            })?;

        if !output.status.success() {
            return Err(ImgresError::CommandFailed {
                command: command_line,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn command_line(&self, args: &[&OsStr]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

impl ImageTool for MagickTool {
    fn probe(&self, path: &Path) -> Result<Dimensions> {
        let stdout = self.run(&[
            path.as_os_str(),
            OsStr::new("-print"),
            OsStr::new("%wx%h\n"),
            OsStr::new("null:"),
        ])?;
        parse_dimensions(path, &stdout)
    }

    fn resize(&self, path: &Path, limit: u32, axis: Axis) -> Result<()> {
        let geometry = OsString::from(resize_geometry(limit, axis));
        self.run(&[
            path.as_os_str(),
            OsStr::new("-resize"),
            geometry.as_os_str(),
            path.as_os_str(),
        ])?;
        Ok(())
    }
}

/// 解析 `WxH` 输出；多帧图像只取第一帧
pub fn parse_dimensions(path: &Path, output: &str) -> Result<Dimensions> {
    let malformed = || ImgresError::ProbeOutput {
        path: path.display().to_string(),
        output: output.trim().to_string(),
    };

    let first = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(malformed)?;

    let (w, h) = first.split_once('x').ok_or_else(malformed)?;
    let width: u32 = w.trim().parse().map_err(|_| malformed())?;
    let height: u32 = h.trim().parse().map_err(|_| malformed())?;

    if width == 0 || height == 0 {
        return Err(malformed());
    }

    Ok(Dimensions::new(width, height))
}

/// ImageMagick 几何参数：`1024x` 约束宽度，`x1024` 约束高度
pub fn resize_geometry(limit: u32, axis: Axis) -> String {
    match axis {
        Axis::Width => format!("{}x", limit),
        Axis::Height => format!("x{}", limit),
    }
}
