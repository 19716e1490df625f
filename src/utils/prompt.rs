//! # 交互确认工具
//!
//! 在缩放每个文件夹之前询问用户 yes/no。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 通过 `Confirmation` trait 使用
//! - 使用 `utils/output.rs` 回显提示

use crate::error::{ImgresError, Result};
use crate::utils::output::Output;

use std::io::{self, BufRead, StdinLock};

/// 确认来源
pub trait Confirmation {
    /// 返回 true 表示继续
    fn confirm(&mut self, question: &str, out: &mut Output) -> Result<bool>;
}

/// 从行输入读取 y/n 回答
pub struct LinePrompt<R> {
    reader: R,
    default: bool,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R, default: bool) -> Self {
        Self { reader, default }
    }

    fn prompt_text(&self, question: &str) -> String {
        if self.default {
            format!("{} [y]|n: ", question)
        } else {
            format!("{} [n]|y: ", question)
        }
    }
}

/// 标准输入上的确认提示，直接回车视为同意
pub fn stdin_prompt() -> LinePrompt<StdinLock<'static>> {
    LinePrompt::new(io::stdin().lock(), true)
}

impl<R: BufRead> Confirmation for LinePrompt<R> {
    fn confirm(&mut self, question: &str, out: &mut Output) -> Result<bool> {
        let prompt = self.prompt_text(question);

        loop {
            out.partial(&prompt);

            let mut answer = String::new();
            let read = self
                .reader
                .read_line(&mut answer)
                .map_err(ImgresError::PromptError)?;

            // 输入结束视为拒绝
            if read == 0 {
                out.line("");
                return Ok(false);
            }

            let answer = answer.trim();
            out.log_only(answer);

            match answer {
                "" => return Ok(self.default),
                "y" | "Y" => return Ok(true),
                "n" | "N" => return Ok(false),
                _ => out.line("please enter y or n."),
            }
        }
    }
}
