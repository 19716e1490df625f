//! # 文件夹批次模型
//!
//! 一个文件夹及其下匹配文件的有序列表，作为一个处理单元。

use std::path::{Path, PathBuf};

/// 文件夹批次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderBatch {
    /// 文件夹路径
    pub folder: PathBuf,
    /// 匹配的文件路径（有序）
    pub files: Vec<PathBuf>,
}

impl FolderBatch {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            files: Vec::new(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
