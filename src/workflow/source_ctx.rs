//! 素材处理上下文
//!
//! 封装"我正在处理素材目录里的哪个文件"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 素材类别（按扩展名判定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 文本类文档（pdf / docx / txt），走逐行解析
    Document,
    /// 电子表格（xlsx / xls），走列映射
    Spreadsheet,
    /// 不认识的扩展名，跳过
    Unsupported,
}

/// 素材处理上下文
#[derive(Debug, Clone)]
pub struct SourceCtx {
    /// 素材文件完整路径
    pub path: PathBuf,

    /// 文件名（用于日志和来源标记）
    pub file_name: String,

    /// 素材在本轮中的索引（仅用于日志显示）
    pub source_index: usize,

    /// 素材类别
    pub kind: SourceKind,
}

impl SourceCtx {
    /// 从路径创建素材上下文
    pub fn new(path: PathBuf, source_index: usize) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = classify(&path);
        Self {
            path,
            file_name,
            source_index,
            kind,
        }
    }

    /// 是否启用块式版式（文件名带 "Life-Question" 标记）
    pub fn allow_block(&self) -> bool {
        self.file_name.contains("Life-Question")
    }
}

impl Display for SourceCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[素材 #{} {}]", self.source_index, self.file_name)
    }
}

fn classify(path: &Path) -> SourceKind {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" | "docx" | "txt" => SourceKind::Document,
        "xlsx" | "xls" => SourceKind::Spreadsheet,
        _ => SourceKind::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(
            SourceCtx::new(PathBuf::from("assets/exam.PDF"), 1).kind,
            SourceKind::Document
        );
        assert_eq!(
            SourceCtx::new(PathBuf::from("assets/bank.xlsx"), 2).kind,
            SourceKind::Spreadsheet
        );
        assert_eq!(
            SourceCtx::new(PathBuf::from("assets/readme.md"), 3).kind,
            SourceKind::Unsupported
        );
    }

    #[test]
    fn test_block_layout_marker() {
        let ctx = SourceCtx::new(PathBuf::from("assets/Life-Question-Set-2.pdf"), 1);
        assert!(ctx.allow_block());
        let ctx = SourceCtx::new(PathBuf::from("assets/mock-paper.pdf"), 2);
        assert!(!ctx.allow_block());
    }
}
