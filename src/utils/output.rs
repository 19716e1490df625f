//! # 美化输出工具
//!
//! 提供统一的终端输出样式，并可选地将每一行同步写入日志文件。
//!
//! 控制台输出带颜色，日志文件写入相同内容的无色版本，顺序一致。
//!
//! ## 依赖关系
//! - 被 `batch/`, `commands/`, `utils/prompt.rs` 使用
//! - 使用 `colored` crate

use crate::error::{ImgresError, Result};

use colored::{ColoredString, Colorize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// `--logs` 写入的日志文件名（位于当前目录）
pub const LOG_FILE_NAME: &str = "imgres-logs.txt";

const RULE_WIDTH: usize = 60;

/// 打印错误消息（不经过日志文件）
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

struct LogFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// 控制台输出 + 可选日志文件
pub struct Output {
    log: Option<LogFile>,
}

impl Output {
    /// 仅输出到控制台
    pub fn console() -> Self {
        Self { log: None }
    }

    /// 输出到控制台并写入日志文件（覆盖已有文件）
    pub fn with_log_file(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| ImgresError::LogFileError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            log: Some(LogFile {
                path: path.to_path_buf(),
                writer: BufWriter::new(file),
            }),
        })
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(|l| l.path.as_path())
    }

    /// 刷新并关闭日志文件
    pub fn finish(mut self) -> Result<()> {
        if let Some(mut log) = self.log.take() {
            log.writer.flush().map_err(|e| ImgresError::LogFileError {
                path: log.path.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }

    pub fn info(&mut self, msg: &str) {
        self.tagged("[*]".blue().bold(), "[*]", msg);
    }

    pub fn success(&mut self, msg: &str) {
        self.tagged("[OK]".green().bold(), "[OK]", msg);
    }

    pub fn warning(&mut self, msg: &str) {
        self.tagged("[WARN]".yellow().bold(), "[WARN]", msg);
    }

    pub fn skip(&mut self, msg: &str) {
        self.tagged("[SKIP]".dimmed(), "[SKIP]", msg);
    }

    pub fn done(&mut self, msg: &str) {
        self.tagged("[DONE]".green().bold(), "[DONE]", msg);
    }

    /// 无标签的整行
    pub fn line(&mut self, msg: &str) {
        println!("{}", msg);
        self.write_log(msg, true);
    }

    /// 不换行输出，后续由 `line` 补全
    pub fn partial(&mut self, msg: &str) {
        print!("{}", msg);
        io::stdout().flush().ok();
        self.write_log(msg, false);
    }

    /// 只写入日志文件（例如用户在终端里输入的回答）
    pub fn log_only(&mut self, line: &str) {
        self.write_log(line, true);
    }

    /// 打印标题栏
    pub fn header(&mut self, title: &str) {
        let line = "─".repeat(RULE_WIDTH);
        println!("\n{}", line.dimmed());
        println!("  {}", title.bold());
        println!("{}\n", line.dimmed());
        self.write_log("", true);
        self.write_log(&line, true);
        self.write_log(&format!("  {}", title), true);
        self.write_log(&line, true);
        self.write_log("", true);
    }

    /// 打印分隔线
    pub fn separator(&mut self) {
        let line = "─".repeat(RULE_WIDTH);
        println!("{}", line.dimmed());
        self.write_log(&line, true);
    }

    /// 多行文本块（如表格），逐行输出
    pub fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    fn tagged(&mut self, styled_tag: ColoredString, tag: &str, msg: &str) {
        println!("{} {}", styled_tag, msg);
        self.write_log(&format!("{} {}", tag, msg), true);
    }

    fn write_log(&mut self, text: &str, newline: bool) {
        let Some(log) = self.log.as_mut() else {
            return;
        };

        let written = if newline {
            writeln!(log.writer, "{}", text)
        } else {
            write!(log.writer, "{}", text)
        };

        if let Err(e) = written {
            tracing::warn!(path = %log.path.display(), error = %e, "log file write failed");
            eprintln!(
                "{} Could not write to {}: {}. Continuing without log file.",
                "[WARN]".yellow().bold(),
                log.path.display(),
                e
            );
            self.log = None;
        }
    }
}
