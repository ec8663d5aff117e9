//! 表格读取器 - 基础设施层
//!
//! 持有"从工作簿取行"这一能力：只读第一个工作表，首行作表头，
//! 之后每行变成 表头 → 单元格文本 的映射。表头在这一边界上
//! 统一做小写、去空白归一化，下游按固定键名取值即可。
//! 不认识题目，不处理业务流程。

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tokio::task;

use crate::error::SheetError;

/// 一行解码结果：归一化表头 → 原始单元格文本
pub type SheetRow = HashMap<String, String>;

/// 读取第一个工作表的全部数据行
pub async fn read_rows(path: &Path) -> Result<Vec<SheetRow>, SheetError> {
    let path = path.to_path_buf();
    task::spawn_blocking(move || read_rows_sync(&path))
        .await
        .map_err(|e| SheetError::Worker {
            message: e.to_string(),
        })?
}

fn read_rows_sync(path: &Path) -> Result<Vec<SheetRow>, SheetError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // 只读第一个工作表
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SheetError::NoSheet {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SheetError::Range {
            path: path.to_path_buf(),
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| normalize_header(&cell_to_string(cell)))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for row in rows_iter {
        let mut map = SheetRow::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            let value = cell_to_string(cell);
            if value.trim().is_empty() {
                continue;
            }
            map.insert(header.clone(), value);
        }
        // 完全空白的行不往下游送
        if !map.is_empty() {
            rows.push(map);
        }
    }
    Ok(rows)
}

/// 表头归一化：容忍任意大小写和首尾空白
fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.to_string(),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Question Body "), "question body");
        assert_eq!(normalize_header("ALTERNATIVE 1"), "alternative 1");
    }

    #[test]
    fn test_cell_to_string_numeric() {
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Int(2)), "2");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
