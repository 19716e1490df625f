//! # 文件收集器
//!
//! 根据根目录与正则模式，按文件夹分组收集待处理文件。
//!
//! ## 功能
//! - 大小写不敏感的正则匹配（匹配相对根目录的路径）
//! - 非递归: 只有根目录一个分组
//! - 递归: 每个可达目录都有分组，即使没有匹配文件
//!
//! ## 依赖关系
//! - 被 `commands/resize.rs` 调用
//! - 使用 `walkdir` 遍历目录, `regex` 匹配路径

use crate::error::{ImgresError, Result};
use crate::models::FolderBatch;

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 收集结果
#[derive(Debug, Default)]
pub struct Discovery {
    /// 按遍历顺序排列的文件夹批次
    pub batches: Vec<FolderBatch>,
    /// 无法访问而被跳过的条目
    pub skipped: Vec<String>,
}

impl Discovery {
    /// 匹配文件总数
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(FolderBatch::len).sum()
    }
}

/// 文件收集器
pub struct FolderCollector {
    /// 根目录
    root: PathBuf,
    /// 匹配模式
    pattern: Regex,
    /// 是否递归
    recursive: bool,
}

impl FolderCollector {
    /// 创建新的文件收集器，模式非法时返回错误
    pub fn new(root: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ImgresError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;

        Ok(Self {
            root: root.into(),
            pattern: regex,
            recursive: false,
        })
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Discovery> {
        if !self.root.is_dir() {
            return Err(ImgresError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut discovery = Discovery {
            batches: vec![FolderBatch::new(&self.root)],
            skipped: Vec::new(),
        };
        let mut folder_index: HashMap<PathBuf, usize> = HashMap::new();
        folder_index.insert(self.root.clone(), 0);

        let walker = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) if err.depth() == 0 => {
                    return Err(ImgresError::DirectoryReadError {
                        path: self.root.display().to_string(),
                        source: err,
                    });
                }
                Err(err) => {
                    let what = match err.path() {
                        Some(path) => format!("{}: {}", path.display(), err),
                        None => err.to_string(),
                    };
                    discovery.skipped.push(what);
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();

            if entry.file_type().is_dir() {
                if self.recursive {
                    folder_index.insert(path.to_path_buf(), discovery.batches.len());
                    discovery.batches.push(FolderBatch::new(path));
                }
                continue;
            }

            // 符号链接指向的普通文件也算
            if !path.is_file() || !self.matches(path) {
                continue;
            }

            let slot = path.parent().and_then(|parent| folder_index.get(parent));
            if let Some(&i) = slot {
                discovery.batches[i].files.push(path.to_path_buf());
            }
        }

        Ok(discovery)
    }

    /// 检查相对根目录的路径是否匹配模式
    fn matches(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.pattern.is_match(&relative.to_string_lossy())
    }
}
