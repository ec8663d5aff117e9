//! 文本提取器 - 基础设施层
//!
//! 持有"从文件取纯文本"这一能力，按扩展名分派：
//!
//! - `.pdf` 交给 pdf-extract
//! - `.docx` 读 zip 容器里的 word/document.xml，流式取段落文本
//! - `.txt` 直接读取
//!
//! 只保证尽力而为的纯文本，不保证版面还原。二进制解码是
//! 阻塞操作，统一放到 spawn_blocking 里执行。
//! 不认识题目，不处理业务流程。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use tokio::task;
use tracing::error;
use zip::ZipArchive;

use crate::error::DecodeError;

/// 提取一个文件的纯文本
///
/// # 参数
/// - `path`: 来源文件路径，扩展名决定解码方式
///
/// # 返回
/// 返回提取出的文本，解码失败返回 `DecodeError`
pub async fn decode(path: &Path) -> Result<String, DecodeError> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => {
            let path = path.to_path_buf();
            task::spawn_blocking(move || decode_pdf(&path))
                .await
                .map_err(|e| DecodeError::Worker {
                    message: e.to_string(),
                })?
        }
        "docx" => {
            let path = path.to_path_buf();
            task::spawn_blocking(move || decode_docx(&path))
                .await
                .map_err(|e| DecodeError::Worker {
                    message: e.to_string(),
                })?
        }
        _ => decode_text(path).await,
    }
}

/// 提取文本，失败时记录日志并按空文本处理
///
/// 单个文件解码失败不允许中断整批处理，这里就是那道隔离层。
pub async fn acquire_text(path: &Path) -> String {
    match decode(path).await {
        Ok(text) => text,
        Err(e) => {
            error!("❌ 提取文本失败，按空文本处理: {}", e);
            String::new()
        }
    }
}

async fn decode_text(path: &Path) -> Result<String, DecodeError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DecodeError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

fn decode_pdf(path: &Path) -> Result<String, DecodeError> {
    pdf_extract::extract_text(path).map_err(|e| DecodeError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn decode_docx(path: &Path) -> Result<String, DecodeError> {
    let file = File::open(path).map_err(|e| DecodeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| DecodeError::DocxContainer {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut entry =
        archive
            .by_name("word/document.xml")
            .map_err(|e| DecodeError::DocxContainer {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml).map_err(|e| DecodeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    extract_docx_paragraphs(&xml, path)
}

/// 从 word/document.xml 取段落文本，每个 w:p 一行
fn extract_docx_paragraphs(xml: &str, path: &Path) -> Result<String, DecodeError> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut out = String::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"tab" => current.push('\t'),
                b"br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        current.push_str(text.as_ref());
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    out.push_str(&current);
                    out.push('\n');
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DecodeError::DocxXml {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
