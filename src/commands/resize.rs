//! # resize 命令实现
//!
//! 按文件夹批量缩放匹配的图像。
//!
//! ## 功能
//! - 收集匹配文件（可递归）
//! - 探测尺寸并缩放超限图像
//! - 可选逐文件夹确认
//! - 可选将输出写入 `./imgres-logs.txt`
//! - 汇总表格与失败计数
//!
//! ## 依赖关系
//! - 使用 `cli/resize.rs` 定义的参数
//! - 使用 `batch/`, `tools/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/prompt.rs`

use crate::batch::{BatchRunner, FolderCollector, RunOutcome, RunSummary};
use crate::cli::resize::ResizeArgs;
use crate::error::Result;
use crate::tools::{ImageTool, MagickTool};
use crate::utils::output::{Output, LOG_FILE_NAME};
use crate::utils::prompt::{self, Confirmation};
use crate::utils::progress;

use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Folder")]
    folder: String,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Resized")]
    resized: usize,
    #[tabled(rename = "Unchanged")]
    skipped: usize,
    #[tabled(rename = "Dry run")]
    planned: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
}

/// 执行 resize 命令
pub fn execute(args: ResizeArgs) -> Result<()> {
    let mut out = if args.logs {
        Output::with_log_file(Path::new(LOG_FILE_NAME))?
    } else {
        Output::console()
    };

    let tool = MagickTool::new(args.convert.as_str());
    let mut stdin_prompt = args.confirm.then(prompt::stdin_prompt);
    let confirmation = stdin_prompt
        .as_mut()
        .map(|p| p as &mut dyn Confirmation);

    let result = resize_images(&args, &tool, confirmation, &mut out);

    // 控制台上的错误由 main 打印，这里只补进日志文件
    if let Err(e) = &result {
        out.log_only(&format!("[ERR] {}", e));
    }
    let finished = out.finish();
    result?;
    finished
}

/// 收集、探测、确认、缩放，并打印汇总
pub fn resize_images(
    args: &ResizeArgs,
    tool: &dyn ImageTool,
    confirmation: Option<&mut dyn Confirmation>,
    out: &mut Output,
) -> Result<()> {
    out.info("Building list of files...");

    let collector = FolderCollector::new(&args.dir, &args.pattern)?.recursive(args.recursive);
    let spinner = progress::create_spinner(&format!("Scanning {}", args.dir.display()));
    let discovery = collector.collect();
    spinner.finish_and_clear();
    let discovery = discovery?;

    for skipped in &discovery.skipped {
        out.warning(&format!("Failed to access {}", skipped));
    }
    out.info(&format!(
        "Found {} matching file(s) in {} folder(s)",
        discovery.file_count(),
        discovery.batches.len()
    ));
    if args.dry_run {
        out.warning("Dry run: no image will be modified");
    }

    let mut runner = BatchRunner::new(tool, args.limit).dry_run(args.dry_run);
    if let Some(confirmation) = confirmation {
        runner = runner.with_confirmation(confirmation);
    }

    match runner.run(&discovery.batches, out)? {
        RunOutcome::Completed(summary) => {
            print_summary(&summary, out);
            out.separator();
            out.info(&format!("{} image(s) resized", summary.resized()));
            if let Some(path) = out.log_path().map(Path::to_path_buf) {
                out.success(&format!("Logging to '{}'", path.display()));
            }
            out.done(&format!("All done. {} exceptions", summary.exceptions()));
        }
        RunOutcome::Declined(_) => {
            out.warning("Resizing declined, remaining folders were not processed");
        }
    }

    Ok(())
}

/// 打印每个文件夹的统计表格
fn print_summary(summary: &RunSummary, out: &mut Output) {
    let rows: Vec<SummaryRow> = summary
        .folders
        .iter()
        .map(|f| SummaryRow {
            folder: f.folder.display().to_string(),
            files: f.files,
            resized: f.resized,
            skipped: f.skipped,
            planned: f.planned,
            failed: f.failed,
        })
        .collect();

    out.header("Summary");
    let table = Table::new(&rows);
    out.block(&table.to_string());

    for report in &summary.folders {
        for (path, err) in &report.failures {
            out.warning(&format!("{}: {}", path, err));
        }
    }
}
