//! 题目校验与去重 - 业务能力层
//!
//! 职责：
//! - 对候选题目逐条套用结构规则（题干长度 / 选项数 / 答案下标）
//! - 按题干归一化键去重，整轮共用一个显式的去重索引
//! - 补全缺失的解析说明
//! - 每条拒绝都带上下文记日志，从不中断批处理
//!
//! 两条流水线分支（文档解析、表格映射）的候选都从这里过。

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::models::CandidateQuestion;

/// 题干最短长度，低于它的多半是切坏的碎片
const MIN_QUESTION_LEN: usize = 10;

/// 接收集的选项数硬性规则
const REQUIRED_OPTION_COUNT: usize = 4;

/// 本轮去重索引
///
/// 显式的值，由校验器持有并随流水线传递，不是模块级环境状态。
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashSet<String>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个归一化键，返回是否首次出现
    pub fn insert(&mut self, key: String) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

/// 拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// 题干过短
    QuestionTooShort { length: usize },
    /// 选项数不是 4
    OptionCount { count: usize },
    /// 答案下标越界
    AnswerOutOfRange { index: i32 },
    /// 归一化后的题干已出现过
    Duplicate,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::QuestionTooShort { length } => {
                write!(f, "题干过短（{} 字符，至少 {}）", length, MIN_QUESTION_LEN)
            }
            RejectReason::OptionCount { count } => {
                write!(f, "选项数为 {}（要求恰好 {}）", count, REQUIRED_OPTION_COUNT)
            }
            RejectReason::AnswerOutOfRange { index } => {
                write!(f, "答案下标越界: {}", index)
            }
            RejectReason::Duplicate => write!(f, "题干重复"),
        }
    }
}

/// 题目校验器
pub struct Validator {
    dedup: DedupIndex,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            dedup: DedupIndex::new(),
        }
    }

    /// 校验单个候选
    ///
    /// 通过时返回（可能补全了说明的）候选，拒绝时返回原因。
    pub fn validate(
        &mut self,
        mut candidate: CandidateQuestion,
    ) -> Result<CandidateQuestion, RejectReason> {
        let question_len = candidate.question.chars().count();
        if question_len < MIN_QUESTION_LEN {
            return Err(RejectReason::QuestionTooShort {
                length: question_len,
            });
        }
        if candidate.options.len() != REQUIRED_OPTION_COUNT {
            return Err(RejectReason::OptionCount {
                count: candidate.options.len(),
            });
        }
        if !(0..REQUIRED_OPTION_COUNT as i32).contains(&candidate.correct_index) {
            return Err(RejectReason::AnswerOutOfRange {
                index: candidate.correct_index,
            });
        }

        if !self.dedup.insert(normalized_key(&candidate.question)) {
            return Err(RejectReason::Duplicate);
        }

        // 说明仍是默认来源标记时，补上正确答案的字母
        if candidate.has_default_explanation() {
            if let Some(letter) = candidate.answer_letter() {
                candidate.explanation =
                    format!("Correct Answer: {}. {}", letter, candidate.explanation);
            }
        }

        Ok(candidate)
    }

    /// 校验整批候选，逐条记录拒绝原因
    pub fn validate_all(&mut self, candidates: Vec<CandidateQuestion>) -> Vec<CandidateQuestion> {
        let total = candidates.len();
        let mut accepted = Vec::with_capacity(total);
        for candidate in candidates {
            let source = candidate.source.clone();
            let question_preview = preview(&candidate.question);
            match self.validate(candidate) {
                Ok(valid) => accepted.push(valid),
                Err(reason) => {
                    warn!(
                        "[{}] ⚠️ 候选被拒绝: {} | 题干: {}",
                        source, reason, question_preview
                    );
                }
            }
        }
        debug!("校验完成: {} 个候选, 接收 {} 个", total, accepted.len());
        accepted
    }

    /// 本轮见过的唯一题干数（含被其他规则拒绝前已登记的）
    pub fn unique_count(&self) -> usize {
        self.dedup.len()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// 题干归一化键：小写 + 去掉所有非字母数字字符
pub fn normalized_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 题干预览（最多 60 个字符，用于日志）
fn preview(text: &str) -> String {
    if text.chars().count() > 60 {
        text.chars().take(60).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(question: &str, option_count: usize, correct_index: i32) -> CandidateQuestion {
        let mut c = CandidateQuestion::open(question, "test.pdf");
        for i in 0..option_count {
            c.push_option(format!("Option {}", i + 1));
        }
        c.correct_index = correct_index;
        c
    }

    #[test]
    fn test_normalized_key() {
        assert_eq!(normalized_key("What is risk?"), "whatisrisk");
        assert_eq!(normalized_key("  WHAT is   RISK!! "), "whatisrisk");
        assert_eq!(normalized_key("Q1: 50% of X"), "q150ofx");
    }

    #[test]
    fn test_accepts_valid_candidate() {
        let mut validator = Validator::new();
        let accepted = validator.validate(candidate("What is risk?", 4, 1)).unwrap();
        assert_eq!(accepted.correct_index, 1);
        // 默认来源标记被改写成带答案字母的说明
        assert_eq!(accepted.explanation, "Correct Answer: B. Source: test.pdf");
    }

    #[test]
    fn test_rejects_short_question() {
        let mut validator = Validator::new();
        let reason = validator.validate(candidate("Short?", 4, 0)).unwrap_err();
        assert!(matches!(reason, RejectReason::QuestionTooShort { .. }));
    }

    #[test]
    fn test_rejects_wrong_option_count() {
        let mut validator = Validator::new();
        let reason = validator
            .validate(candidate("What is a three-option question?", 3, 0))
            .unwrap_err();
        assert_eq!(reason, RejectReason::OptionCount { count: 3 });
    }

    #[test]
    fn test_rejects_answer_out_of_range() {
        let mut validator = Validator::new();
        let reason = validator
            .validate(candidate("What is an unanswered question?", 4, -1))
            .unwrap_err();
        assert_eq!(reason, RejectReason::AnswerOutOfRange { index: -1 });
        let reason = validator
            .validate(candidate("What is an overflowing answer?", 4, 4))
            .unwrap_err();
        assert_eq!(reason, RejectReason::AnswerOutOfRange { index: 4 });
    }

    #[test]
    fn test_rejects_duplicate_across_sources() {
        let mut validator = Validator::new();
        let mut first = candidate("What is risk?", 4, 0);
        first.source = "one.pdf".to_string();
        let mut second = candidate("WHAT IS RISK??", 4, 2);
        second.source = "two.docx".to_string();

        assert!(validator.validate(first).is_ok());
        let reason = validator.validate(second).unwrap_err();
        assert_eq!(reason, RejectReason::Duplicate);
        assert_eq!(validator.unique_count(), 1);
    }

    #[test]
    fn test_custom_explanation_not_rewritten() {
        let mut validator = Validator::new();
        let mut c = candidate("What is risk in insurance?", 4, 2);
        c.explanation = "<strong>Category:</strong> Basics<br><br>".to_string();
        let accepted = validator.validate(c).unwrap();
        assert_eq!(
            accepted.explanation,
            "<strong>Category:</strong> Basics<br><br>"
        );
    }

    #[test]
    fn test_validate_all_keeps_order() {
        let mut validator = Validator::new();
        let accepted = validator.validate_all(vec![
            candidate("What is the first question?", 4, 0),
            candidate("bad", 4, 0),
            candidate("What is the second question?", 4, 3),
        ]);
        assert_eq!(accepted.len(), 2);
        assert_eq!(accepted[0].question, "What is the first question?");
        assert_eq!(accepted[1].question, "What is the second question?");
    }
}
