//! # resize 参数定义
//!
//! 模式、最大边限制以及运行选项。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/resize.rs`

use crate::tools::magick::DEFAULT_CONVERT;

use clap::Args;
use std::path::PathBuf;

/// resize 参数
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Case-insensitive regular expression matched against file paths
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Maximum allowed size of the greater dimension, in pixels
    #[arg(value_name = "GREATER_DIM_LIMIT", value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Search recursively also into subfolders
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Ask for confirmation before resizing images from each folder
    #[arg(short, long, default_value_t = false)]
    pub confirm: bool,

    /// Write a "./imgres-logs.txt" logfile of the run
    #[arg(short, long, default_value_t = false)]
    pub logs: bool,

    /// Directory to search for images
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// ImageMagick executable used to probe and resize images
    #[arg(long, env = "IMGRES_CONVERT", default_value = DEFAULT_CONVERT)]
    pub convert: String,

    /// Probe and report without resizing anything
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positionals_and_flags() {
        let cli = Cli::try_parse_from(["imgres", "-r", "--confirm", "-l", r"\.jpg$", "1024"]).unwrap();
        let args = cli.resize;
        assert_eq!(args.pattern, r"\.jpg$");
        assert_eq!(args.limit, 1024);
        assert!(args.recursive);
        assert!(args.confirm);
        assert!(args.logs);
        assert!(!args.dry_run);
        assert_eq!(args.dir, PathBuf::from("."));
    }

    #[test]
    fn test_combined_short_flags() {
        let cli = Cli::try_parse_from(["imgres", "-rcl", "png", "800"]).unwrap();
        assert!(cli.resize.recursive && cli.resize.confirm && cli.resize.logs);
    }

    #[test]
    fn test_missing_limit() {
        let err = Cli::try_parse_from(["imgres", r"\.jpg$"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        for limit in ["0", "-5", "12.5", "big"] {
            assert!(Cli::try_parse_from(["imgres", "jpg", limit]).is_err());
        }
    }

    #[test]
    fn test_unknown_flag() {
        let err = Cli::try_parse_from(["imgres", "-x", "jpg", "1024"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = Cli::try_parse_from(["imgres", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
