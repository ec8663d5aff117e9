//! 表格行映射 - 业务能力层
//!
//! 职责：
//! - 把一行工作表数据映射成候选题目
//! - 只处理单行，缺列或答案无效就跳过（记日志，不中断）
//! - 不关心流程顺序
//!
//! 字段在行边界上一次性取成固定形状，下游不再按字符串键
//! 零散取值。

use tracing::warn;

use crate::infrastructure::SheetRow;
use crate::models::{answer, CandidateQuestion};

// ========== 列名（已归一化：小写、去空白） ==========

const COL_QUESTION: &str = "question body";
const COL_ALTERNATIVES: [&str; 4] = [
    "alternative 1",
    "alternative 2",
    "alternative 3",
    "alternative 4",
];
const COL_ANSWER: &str = "correct alternative";
const COL_CATEGORY: &str = "syllabus category name";
const COL_ADDITIONAL: &str = "additional information";

/// 一行的固定字段视图
struct RowFields<'a> {
    question: &'a str,
    alternatives: [&'a str; 4],
    answer_raw: &'a str,
    category: &'a str,
    additional: &'a str,
}

impl<'a> RowFields<'a> {
    /// 校验必填列并取出字段，缺任何一列返回 None
    fn from_row(row: &'a SheetRow) -> Option<Self> {
        let question = row.get(COL_QUESTION)?;
        let mut alternatives = [""; 4];
        for (slot, column) in alternatives.iter_mut().zip(COL_ALTERNATIVES) {
            *slot = row.get(column)?;
        }
        let answer_raw = row.get(COL_ANSWER)?;
        Some(Self {
            question,
            alternatives,
            answer_raw,
            category: row.get(COL_CATEGORY).map(String::as_str).unwrap_or("General"),
            additional: row.get(COL_ADDITIONAL).map(String::as_str).unwrap_or(""),
        })
    }
}

/// 把一行工作表数据映射成候选题目
///
/// # 参数
/// - `row`: 已归一化表头的行数据
/// - `row_number`: 行号（含表头，用于日志定位）
/// - `source`: 来源文件名
pub fn map_row(row: &SheetRow, row_number: usize, source: &str) -> Option<CandidateQuestion> {
    let fields = match RowFields::from_row(row) {
        Some(fields) => fields,
        None => {
            warn!("[{}] ⚠️ 跳过第 {} 行: 缺少必填列", source, row_number);
            return None;
        }
    };

    let correct_index = match resolve_answer(fields.answer_raw) {
        Some(index) => index,
        None => {
            warn!(
                "[{}] ⚠️ 跳过第 {} 行: 答案格式无效 \"{}\"",
                source, row_number, fields.answer_raw
            );
            return None;
        }
    };

    let mut candidate = CandidateQuestion::open(fields.question.trim(), source);
    for alternative in fields.alternatives {
        candidate.push_option(alternative.trim());
    }
    candidate.correct_index = correct_index as i32;
    candidate.explanation = format!(
        "<strong>Category:</strong> {}<br><br>{}",
        fields.category.trim(),
        fields.additional.trim()
    );
    Some(candidate)
}

/// 答案归一化
///
/// 按优先级依次尝试：数字 1-4 的子串、字母 A-D、罗马数字 I-IV。
/// 数字子串必须最先试，"Option 1" 这类原始值要先落到下标 0，
/// 不能走字母分支。
fn resolve_answer(raw: &str) -> Option<u32> {
    let normalized = raw.trim().to_uppercase();

    for (digit, index) in [('1', 0), ('2', 1), ('3', 2), ('4', 3)] {
        if normalized.contains(digit) {
            return Some(index);
        }
    }

    if normalized.chars().count() == 1 {
        if let Some(index) = normalized.chars().next().and_then(answer::index_from_letter) {
            return Some(index);
        }
    }

    answer::index_from_roman(&normalized).filter(|index| *index < 4)
}
