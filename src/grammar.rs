//! 行文法库
//!
//! 三套命名的行级文法（standard / roman / block），每套由
//! 题干起始、选项、答案三个匹配器组成，全部只作用于单行：
//!
//! - `standard`：`1. 题干` / `a) 选项` / `Ans: b`
//! - `roman`：`Q1: 题干` / `II. 选项` / `Answer: III`
//! - `block`：整行裸数字分隔的块状版式，只对文件名带有
//!   已知版式标记的来源开放
//!
//! 选择规则：没有打开的题目时按 standard → roman → block 的固定
//! 顺序试配题干起始，首个命中的文法对整道题锁定；锁定期间只
//! 试配该文法自己的选项 / 答案匹配器，避免一种文法的选项行被
//! 误读成另一种文法的题干起始。

use anyhow::Result;
use regex::Regex;

use crate::models::answer;

/// 文法标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarKind {
    /// 阿拉伯数字题号 + 字母/数字选项
    Standard,
    /// 可选 Q 前缀题号 + 罗马数字选项
    Roman,
    /// 裸数字分隔的块状版式
    Block,
}

impl GrammarKind {
    /// 文法名称（用于日志）
    pub fn name(self) -> &'static str {
        match self {
            GrammarKind::Standard => "standard",
            GrammarKind::Roman => "roman",
            GrammarKind::Block => "block",
        }
    }
}

/// 题干起始匹配结果
#[derive(Debug, Clone)]
pub struct QuestionStart {
    pub kind: GrammarKind,
    /// 题干首行文本（block 文法下是原始的裸数字行）
    pub text: String,
}

/// 选项标记的符号族
///
/// standard 文法同时认字母和数字选项，但一道题内不混用：
/// 首个选项落定符号族后，另一族的 `2. xxx` 行要当新题干处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFamily {
    /// a-d / A-D
    Letter,
    /// 1-4
    Digit,
    /// I-IV
    Roman,
}

/// 选项匹配结果
#[derive(Debug, Clone)]
pub struct OptionMatch {
    pub family: OptionFamily,
    pub text: String,
}

/// 行文法库
///
/// 职责：
/// - 持有各文法编译好的正则
/// - 回答"这一行是什么"（题干起始 / 选项 / 答案 / 噪声）
/// - 不维护任何跨行状态
pub struct GrammarBank {
    standard_question: Regex,
    standard_option: Regex,
    standard_answer: Regex,
    roman_question: Regex,
    roman_option: Regex,
    roman_answer: Regex,
    bare_int: Regex,
    boilerplate: Regex,
}

impl GrammarBank {
    /// 编译全部文法正则
    pub fn new() -> Result<Self> {
        Ok(Self {
            standard_question: Regex::new(r"^\s*(\d+)[.)]\s*(.+)")?,
            standard_option: Regex::new(r"^\s*([a-dA-D1-4])[.)]\s*(.+)")?,
            standard_answer: Regex::new(
                r"(?i)(?:Ans|Answer|Correct Option)\s*[:\-]\s*([a-dA-D1-4])",
            )?,
            roman_question: Regex::new(r"(?i)^\s*Q?(\d+)[:.]\s*(.+)")?,
            roman_option: Regex::new(r"^\s*([IVX]+)[.)]\s*(.+)")?,
            roman_answer: Regex::new(r"(?i)(?:Ans|Answer)\s*[:\-]\s*([IVX]+|[a-dA-D])")?,
            bare_int: Regex::new(r"^\d+$")?,
            boilerplate: Regex::new(r"(?i)^(Page|Chapter|Section|ambitiousbaba)")?,
        })
    }

    /// 按固定顺序试配题干起始，返回首个命中的文法
    ///
    /// `allow_block` 只对文件名带版式标记的来源为 true。
    pub fn match_question_start(&self, line: &str, allow_block: bool) -> Option<QuestionStart> {
        if let Some(caps) = self.standard_question.captures(line) {
            return Some(QuestionStart {
                kind: GrammarKind::Standard,
                text: caps[2].to_string(),
            });
        }
        if let Some(caps) = self.roman_question.captures(line) {
            return Some(QuestionStart {
                kind: GrammarKind::Roman,
                text: caps[2].to_string(),
            });
        }
        if allow_block && self.bare_int.is_match(line) {
            return Some(QuestionStart {
                kind: GrammarKind::Block,
                text: line.to_string(),
            });
        }
        None
    }

    /// 试配锁定文法的选项行，返回符号族和选项文本
    pub fn match_option(&self, kind: GrammarKind, line: &str) -> Option<OptionMatch> {
        let regex = match kind {
            GrammarKind::Standard => &self.standard_option,
            GrammarKind::Roman => &self.roman_option,
            // block 文法的选项没有行内标记，由装配器按位置切出
            GrammarKind::Block => return None,
        };
        let caps = regex.captures(line)?;
        let family = match kind {
            GrammarKind::Roman => OptionFamily::Roman,
            _ if caps[1].chars().next().map_or(false, |c| c.is_ascii_digit()) => {
                OptionFamily::Digit
            }
            _ => OptionFamily::Letter,
        };
        Some(OptionMatch {
            family,
            text: caps[2].to_string(),
        })
    }

    /// 试配锁定文法的答案行，返回换算后的选项下标
    pub fn match_answer(&self, kind: GrammarKind, line: &str) -> Option<u32> {
        match kind {
            GrammarKind::Standard => {
                let caps = self.standard_answer.captures(line)?;
                caps[1].chars().next().and_then(answer::index_from_symbol)
            }
            GrammarKind::Roman => {
                let caps = self.roman_answer.captures(line)?;
                let token = &caps[1];
                answer::index_from_roman(token).or_else(|| {
                    token.chars().next().and_then(answer::index_from_letter)
                })
            }
            // block 的答案是收尾的裸数字行，见 bare_integer
            GrammarKind::Block => None,
        }
    }

    /// 整行是否只有一个裸整数，是则返回其值
    pub fn bare_integer(&self, line: &str) -> Option<u64> {
        if self.bare_int.is_match(line) {
            line.parse().ok()
        } else {
            None
        }
    }

    /// 是否是页眉页脚之类的噪声行（永远不并入题干）
    pub fn is_boilerplate(&self, line: &str) -> bool {
        self.boilerplate.is_match(line)
    }
}
