use serde::{Deserialize, Serialize};

/// 候选题目
///
/// 组装阶段的可变记录：题干逐行累积，选项按文档顺序追加，
/// `correct_index` 在答案行出现前保持哨兵值 -1。
/// 通过校验后不再修改。
#[derive(Debug, Clone)]
pub struct CandidateQuestion {
    /// 题干文本
    pub question: String,
    /// 选项文本，插入顺序 = 文档顺序
    pub options: Vec<String>,
    /// 正确选项下标（从 0 开始），-1 表示尚未确定
    pub correct_index: i32,
    /// 解析说明，默认是来源标记
    pub explanation: String,
    /// 来源文件名（用于溯源和默认说明）
    pub source: String,
}

impl CandidateQuestion {
    /// 正确选项尚未确定的哨兵值
    pub const ANSWER_UNSET: i32 = -1;

    /// 以题干首行创建新的候选题目
    pub fn open(question: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            question: question.into(),
            options: Vec::new(),
            correct_index: Self::ANSWER_UNSET,
            explanation: format!("Source: {}", source),
            source,
        }
    }

    /// 追加题干续行（仅在选项开始前调用）
    pub fn append_question_text(&mut self, line: &str) {
        self.question.push(' ');
        self.question.push_str(line);
    }

    /// 追加一个选项
    pub fn push_option(&mut self, text: impl Into<String>) {
        self.options.push(text.into());
    }

    /// 正确选项是否已确定
    pub fn has_answer(&self) -> bool {
        self.correct_index != Self::ANSWER_UNSET
    }

    /// 正确选项对应的字母（A-D），下标无效时返回 None
    pub fn answer_letter(&self) -> Option<char> {
        if (0..4).contains(&self.correct_index) {
            Some((b'A' + self.correct_index as u8) as char)
        } else {
            None
        }
    }

    /// 说明是否仍是默认的来源标记
    pub fn has_default_explanation(&self) -> bool {
        self.explanation.is_empty() || self.explanation.starts_with("Source:")
    }
}

/// 题库记录
///
/// 校验、去重、编号之后的最终形态，与答题端读取的
/// questions.json 中的对象一一对应。编号从 1 开始连续分配，
/// `previous` / `next` 构成与编号顺序一致的双向链。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct_index: u32,
    pub explanation: String,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}
