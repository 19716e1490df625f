//! # 图像尺寸模型
//!
//! 像素尺寸以及基于最大边限制的缩放决策。

use std::fmt;

/// 缩放时受约束的轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// 图像像素尺寸（宽 x 高）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 较大的一边
    pub fn greater(&self) -> u32 {
        self.width.max(self.height)
    }

    /// 较大的一边所在的轴，宽高相等时取宽
    pub fn greater_axis(&self) -> Axis {
        if self.width >= self.height {
            Axis::Width
        } else {
            Axis::Height
        }
    }

    /// 根据最大边限制决定是否缩放
    pub fn decide(&self, limit: u32) -> ResizeDecision {
        if self.greater() > limit {
            ResizeDecision::Resize(self.greater_axis())
        } else {
            ResizeDecision::Keep
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// 单个文件的缩放决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDecision {
    /// 已在限制之内
    Keep,
    /// 将指定轴约束到限制值
    Resize(Axis),
}
