//! # 批量执行器
//!
//! 逐个文件夹顺序执行：探测全部尺寸 -> （可选）确认 -> 逐个缩放。
//!
//! ## 功能
//! - 探测失败终止整个运行（缩放决策依赖完整尺寸列表）
//! - 单个文件缩放失败只计数，不影响后续文件
//! - 用户拒绝确认时立即结束，不再处理剩余文件夹
//! - 每个文件夹的统计汇总
//!
//! ## 依赖关系
//! - 被 `commands/resize.rs` 调用
//! - 使用 `tools::ImageTool` 执行外部命令
//! - 使用 `utils/output.rs`, `utils/prompt.rs`

use crate::error::Result;
use crate::models::{Dimensions, FolderBatch, ResizeDecision};
use crate::tools::ImageTool;
use crate::utils::output::Output;
use crate::utils::prompt::Confirmation;

use std::path::{Path, PathBuf};

/// 确认提示问题
pub const CONFIRM_QUESTION: &str = "Do you really want to resize listed images?";

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已缩放
    Resized,
    /// 尺寸已在限制内
    Skipped,
    /// 演练模式下本应缩放
    Planned,
    /// 缩放失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 单个文件夹的统计
#[derive(Debug, Default, Clone)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub files: usize,
    pub resized: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl FolderReport {
    fn new(batch: &FolderBatch) -> Self {
        Self {
            folder: batch.folder.clone(),
            files: batch.len(),
            ..Self::default()
        }
    }

    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Resized => self.resized += 1,
            ProcessResult::Skipped => self.skipped += 1,
            ProcessResult::Planned => self.planned += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }
}

/// 整个运行的统计
#[derive(Debug, Default)]
pub struct RunSummary {
    pub folders: Vec<FolderReport>,
}

impl RunSummary {
    /// 整个运行中的失败次数
    pub fn exceptions(&self) -> usize {
        self.folders.iter().map(|f| f.failed).sum()
    }

    pub fn resized(&self) -> usize {
        self.folders.iter().map(|f| f.resized).sum()
    }
}

/// 运行结束方式
#[derive(Debug)]
pub enum RunOutcome {
    /// 所有文件夹处理完毕
    Completed(RunSummary),
    /// 用户在确认时拒绝，剩余文件夹未处理
    Declined(RunSummary),
}

/// 批量执行器
pub struct BatchRunner<'a> {
    tool: &'a dyn ImageTool,
    /// 最大边限制
    limit: u32,
    dry_run: bool,
    confirmation: Option<&'a mut dyn Confirmation>,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(tool: &'a dyn ImageTool, limit: u32) -> Self {
        Self {
            tool,
            limit,
            dry_run: false,
            confirmation: None,
        }
    }

    /// 只探测和报告，不执行缩放
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 每个文件夹缩放前询问
    pub fn with_confirmation(mut self, confirmation: &'a mut dyn Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// 顺序处理所有文件夹
    pub fn run(&mut self, batches: &[FolderBatch], out: &mut Output) -> Result<RunOutcome> {
        let mut summary = RunSummary::default();

        for batch in batches {
            out.header(&format!("Processing folder: {}", batch.folder().display()));

            if batch.is_empty() {
                out.skip("No matching files...");
                summary.folders.push(FolderReport::new(batch));
                continue;
            }

            out.info(&format!(
                "Going to resize following images to have the greater of dimensions <= {}",
                self.limit
            ));
            let sizes = self.probe_folder(batch, out)?;

            if let Some(confirmation) = self.confirmation.as_deref_mut() {
                if !confirmation.confirm(CONFIRM_QUESTION, out)? {
                    summary.folders.push(FolderReport::new(batch));
                    return Ok(RunOutcome::Declined(summary));
                }
            }

            summary.folders.push(self.resize_folder(batch, &sizes, out));
        }

        Ok(RunOutcome::Completed(summary))
    }

    /// 探测文件夹内所有文件的尺寸，任一失败即中止
    fn probe_folder(&self, batch: &FolderBatch, out: &mut Output) -> Result<Vec<Dimensions>> {
        let mut sizes = Vec::with_capacity(batch.len());

        for (i, file) in batch.files.iter().enumerate() {
            out.partial(&format!("\t{}.) {}: ", i + 1, file.display()));
            match self.tool.probe(file) {
                Ok(dims) => {
                    out.line(&dims.to_string());
                    sizes.push(dims);
                }
                Err(e) => {
                    out.line(&format!("exception {}", e));
                    return Err(e);
                }
            }
        }

        Ok(sizes)
    }

    /// 逐个缩放；失败计数后继续
    fn resize_folder(
        &self,
        batch: &FolderBatch,
        sizes: &[Dimensions],
        out: &mut Output,
    ) -> FolderReport {
        let mut report = FolderReport::new(batch);
        let total = batch.len();

        for (i, (file, dims)) in batch.files.iter().zip(sizes).enumerate() {
            let order = format!("\t{}/{}.) ", i + 1, total);
            let result = self.resize_file(file, dims, &order, out);
            report.merge(result);
        }

        report
    }

    fn resize_file(
        &self,
        file: &Path,
        dims: &Dimensions,
        order: &str,
        out: &mut Output,
    ) -> ProcessResult {
        let axis = match dims.decide(self.limit) {
            ResizeDecision::Keep => {
                out.line(&format!("{}no need to resize {}", order, file.display()));
                return ProcessResult::Skipped;
            }
            ResizeDecision::Resize(axis) => axis,
        };

        if self.dry_run {
            out.line(&format!(
                "{}would resize {} ({} -> {} {})",
                order,
                file.display(),
                dims,
                axis,
                self.limit
            ));
            return ProcessResult::Planned;
        }

        out.line(&format!("{}resizing {}", order, file.display()));
        match self.tool.resize(file, self.limit, axis) {
            Ok(()) => ProcessResult::Resized,
            Err(e) => {
                out.line(&format!(
                    "{}exception {} for file {}",
                    order,
                    e,
                    file.display()
                ));
                ProcessResult::Failed(file.display().to_string(), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImgresError;
    use crate::models::Axis;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet, VecDeque};

    /// 记录调用的假工具
    #[derive(Default)]
    struct FakeTool {
        sizes: HashMap<PathBuf, Dimensions>,
        failing_resizes: HashSet<PathBuf>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeTool {
        fn image(mut self, path: &str, width: u32, height: u32) -> Self {
            self.sizes
                .insert(PathBuf::from(path), Dimensions::new(width, height));
            self
        }

        fn failing(mut self, path: &str) -> Self {
            self.failing_resizes.insert(PathBuf::from(path));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn resize_calls(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|c| c.starts_with("resize"))
                .collect()
        }
    }

    impl ImageTool for FakeTool {
        fn probe(&self, path: &Path) -> Result<Dimensions> {
            self.calls
                .borrow_mut()
                .push(format!("probe {}", path.display()));
            self.sizes
                .get(path)
                .copied()
                .ok_or_else(|| ImgresError::CommandFailed {
                    command: format!("convert {}", path.display()),
                    stderr: "no decode delegate".to_string(),
                })
        }

        fn resize(&self, path: &Path, limit: u32, axis: Axis) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("resize {} {} {}", path.display(), axis, limit));
            if self.failing_resizes.contains(path) {
                return Err(ImgresError::CommandFailed {
                    command: format!("convert {}", path.display()),
                    stderr: "disk full".to_string(),
                });
            }
            Ok(())
        }
    }

    /// 预设回答的确认
    struct ScriptedConfirmation {
        answers: VecDeque<bool>,
        asked: usize,
    }

    impl ScriptedConfirmation {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: 0,
            }
        }
    }

    impl Confirmation for ScriptedConfirmation {
        fn confirm(&mut self, _question: &str, _out: &mut Output) -> Result<bool> {
            self.asked += 1;
            Ok(self.answers.pop_front().unwrap_or(false))
        }
    }

    fn batch(folder: &str, files: &[&str]) -> FolderBatch {
        FolderBatch {
            folder: PathBuf::from(folder),
            files: files.iter().map(PathBuf::from).collect(),
        }
    }

    fn completed(outcome: RunOutcome) -> RunSummary {
        match outcome {
            RunOutcome::Completed(summary) => summary,
            RunOutcome::Declined(_) => panic!("run was declined"),
        }
    }

    #[test]
    fn test_resizes_greater_axis_only_when_over_limit() {
        let tool = FakeTool::default()
            .image("./a.jpg", 2000, 1000)
            .image("./c.jpg", 800, 1600)
            .image("./d.jpg", 1024, 700);
        let batches = vec![batch(".", &["./a.jpg", "./c.jpg", "./d.jpg"])];

        let summary = completed(
            BatchRunner::new(&tool, 1024)
                .run(&batches, &mut Output::console())
                .unwrap(),
        );

        assert_eq!(
            tool.resize_calls(),
            vec!["resize ./a.jpg width 1024", "resize ./c.jpg height 1024"]
        );
        assert_eq!(summary.exceptions(), 0);
        assert_eq!(summary.folders[0].resized, 2);
        assert_eq!(summary.folders[0].skipped, 1);
    }

    #[test]
    fn test_probes_whole_folder_before_resizing() {
        let tool = FakeTool::default()
            .image("a.jpg", 3000, 10)
            .image("b.jpg", 10, 3000);
        let batches = vec![batch(".", &["a.jpg", "b.jpg"])];

        BatchRunner::new(&tool, 100)
            .run(&batches, &mut Output::console())
            .unwrap();

        assert_eq!(
            tool.calls(),
            vec![
                "probe a.jpg",
                "probe b.jpg",
                "resize a.jpg width 100",
                "resize b.jpg height 100",
            ]
        );
    }

    #[test]
    fn test_resize_failure_is_counted_and_skipped() {
        let tool = FakeTool::default()
            .image("a.jpg", 3000, 2000)
            .image("b.jpg", 3000, 2000)
            .image("c.jpg", 3000, 2000)
            .failing("a.jpg")
            .failing("c.jpg");
        let batches = vec![batch("one", &["a.jpg", "b.jpg"]), batch("two", &["c.jpg"])];

        let summary = completed(
            BatchRunner::new(&tool, 1024)
                .run(&batches, &mut Output::console())
                .unwrap(),
        );

        assert_eq!(tool.resize_calls().len(), 3);
        assert_eq!(summary.exceptions(), 2);
        assert_eq!(summary.folders[0].failed, 1);
        assert_eq!(summary.folders[0].resized, 1);
        assert_eq!(summary.folders[0].failures[0].0, "a.jpg");
        assert_eq!(summary.folders[1].failed, 1);
    }

    #[test]
    fn test_probe_failure_aborts_before_any_resize() {
        let tool = FakeTool::default()
            .image("a.jpg", 3000, 2000)
            .image("later.jpg", 3000, 2000);
        let batches = vec![
            batch("one", &["a.jpg", "corrupt.jpg"]),
            batch("two", &["later.jpg"]),
        ];

        let result = BatchRunner::new(&tool, 1024).run(&batches, &mut Output::console());

        assert!(matches!(result, Err(ImgresError::CommandFailed { .. })));
        assert!(tool.resize_calls().is_empty());
        assert_eq!(tool.calls(), vec!["probe a.jpg", "probe corrupt.jpg"]);
    }

    #[test]
    fn test_empty_folder_is_skipped() {
        let tool = FakeTool::default().image("b/x.jpg", 5000, 5000);
        let batches = vec![batch("a", &[]), batch("b", &["b/x.jpg"])];
        let mut confirmation = ScriptedConfirmation::new(&[true]);

        let summary = completed(
            BatchRunner::new(&tool, 1024)
                .with_confirmation(&mut confirmation)
                .run(&batches, &mut Output::console())
                .unwrap(),
        );

        // 空文件夹不询问
        assert_eq!(confirmation.asked, 1);
        assert_eq!(summary.folders.len(), 2);
        assert_eq!(summary.folders[0].files, 0);
        assert_eq!(summary.resized(), 1);
    }

    #[test]
    fn test_declined_confirmation_stops_run() {
        let tool = FakeTool::default()
            .image("a.jpg", 3000, 2000)
            .image("b.jpg", 3000, 2000)
            .image("c.jpg", 3000, 2000);
        let batches = vec![
            batch("one", &["a.jpg"]),
            batch("two", &["b.jpg"]),
            batch("three", &["c.jpg"]),
        ];
        let mut confirmation = ScriptedConfirmation::new(&[true, false]);

        let outcome = BatchRunner::new(&tool, 1024)
            .with_confirmation(&mut confirmation)
            .run(&batches, &mut Output::console())
            .unwrap();

        assert!(matches!(outcome, RunOutcome::Declined(_)));
        assert_eq!(confirmation.asked, 2);
        assert_eq!(tool.resize_calls(), vec!["resize a.jpg width 1024"]);
        assert!(!tool.calls().contains(&"probe c.jpg".to_string()));
    }

    #[test]
    fn test_dry_run_never_resizes() {
        let tool = FakeTool::default()
            .image("a.jpg", 3000, 2000)
            .image("b.jpg", 300, 200);
        let batches = vec![batch(".", &["a.jpg", "b.jpg"])];

        let summary = completed(
            BatchRunner::new(&tool, 1024)
                .dry_run(true)
                .run(&batches, &mut Output::console())
                .unwrap(),
        );

        assert!(tool.resize_calls().is_empty());
        assert_eq!(summary.folders[0].planned, 1);
        assert_eq!(summary.folders[0].skipped, 1);
    }
}
