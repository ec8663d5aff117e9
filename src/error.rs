//! 错误类型
//!
//! 每个基础设施 / 落盘环节各有一个具体错误枚举，带路径上下文。
//! 编排层用 anyhow 汇总，错误之间不需要统一的伞形类型。

use std::fmt;
use std::path::PathBuf;

/// 文本提取错误（PDF / DOCX / TXT）
#[derive(Debug)]
pub enum DecodeError {
    /// 读取文件失败
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// PDF 解析失败
    Pdf { path: PathBuf, message: String },
    /// DOCX 容器无效（不是有效的 zip 或缺少 word/document.xml）
    DocxContainer { path: PathBuf, message: String },
    /// DOCX 正文 XML 解析失败
    DocxXml { path: PathBuf, message: String },
    /// 后台解码任务失败
    Worker { message: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Io { path, source } => {
                write!(f, "无法读取文件 {}: {}", path.display(), source)
            }
            DecodeError::Pdf { path, message } => {
                write!(f, "PDF 解析失败 {}: {}", path.display(), message)
            }
            DecodeError::DocxContainer { path, message } => {
                write!(f, "DOCX 容器无效 {}: {}", path.display(), message)
            }
            DecodeError::DocxXml { path, message } => {
                write!(f, "DOCX 正文解析失败 {}: {}", path.display(), message)
            }
            DecodeError::Worker { message } => {
                write!(f, "解码任务失败: {}", message)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 表格读取错误（XLSX / XLS）
#[derive(Debug)]
pub enum SheetError {
    /// 打开工作簿失败
    Open { path: PathBuf, message: String },
    /// 工作簿中没有工作表
    NoSheet { path: PathBuf },
    /// 读取工作表失败
    Range {
        path: PathBuf,
        sheet: String,
        message: String,
    },
    /// 后台读取任务失败
    Worker { message: String },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Open { path, message } => {
                write!(f, "无法打开工作簿 {}: {}", path.display(), message)
            }
            SheetError::NoSheet { path } => {
                write!(f, "工作簿中没有工作表: {}", path.display())
            }
            SheetError::Range {
                path,
                sheet,
                message,
            } => {
                write!(
                    f,
                    "读取工作表 {} 失败 {}: {}",
                    sheet,
                    path.display(),
                    message
                )
            }
            SheetError::Worker { message } => {
                write!(f, "表格读取任务失败: {}", message)
            }
        }
    }
}

impl std::error::Error for SheetError {}

/// 题库写入错误
#[derive(Debug)]
pub enum BankError {
    /// 序列化失败
    Serialize { source: serde_json::Error },
    /// 写入临时文件失败
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 原子替换输出文件失败
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::Serialize { source } => {
                write!(f, "题库序列化失败: {}", source)
            }
            BankError::Write { path, source } => {
                write!(f, "无法写入 {}: {}", path.display(), source)
            }
            BankError::Rename { from, to, source } => {
                write!(
                    f,
                    "无法将 {} 替换到 {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for BankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BankError::Serialize { source } => Some(source),
            BankError::Write { source, .. } => Some(source),
            BankError::Rename { source, .. } => Some(source),
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 素材目录不存在
    AssetsDirMissing { path: PathBuf },
    /// 输出目录不存在且无法创建
    OutputDirUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::AssetsDirMissing { path } => {
                write!(f, "素材目录不存在: {}", path.display())
            }
            ConfigError::OutputDirUnavailable { path, source } => {
                write!(f, "输出目录不可用 {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::AssetsDirMissing { .. } => None,
            ConfigError::OutputDirUnavailable { source, .. } => Some(source),
        }
    }
}
