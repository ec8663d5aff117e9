//! 题目装配器 - 业务能力层
//!
//! 职责：
//! - 消费切好的行流，一次处理一个文档
//! - 按固定顺序试配题干起始并锁定文法，直到该题收尾
//! - 产出候选题目（未校验、未去重、未编号）
//!
//! 状态是显式的带标签枚举（空闲 / 打开 / 块缓冲），在行与行
//! 之间由纯转移函数推进，不依赖任何模块级可变状态。

use anyhow::Result;
use tracing::{debug, warn};

use crate::grammar::{GrammarBank, GrammarKind, OptionFamily};
use crate::models::CandidateQuestion;

/// 装配状态
enum AssemblerState {
    /// 没有打开的题目
    Idle,
    /// 一道题正在累积，文法已锁定；首个选项落定后符号族也锁定
    Open {
        grammar: GrammarKind,
        candidate: CandidateQuestion,
        family: Option<OptionFamily>,
    },
    /// block 版式：缓冲自上一个确认块以来的所有行
    Block { buffer: Vec<String> },
}

/// 题目装配器
///
/// 每个文档各用一个实例，实例间不共享状态。
pub struct RecordAssembler {
    bank: GrammarBank,
    /// 来源文件名，用于溯源和日志前缀
    source: String,
    /// 文件名带版式标记时才开放 block 文法
    allow_block: bool,
    /// 收尾时保留候选的最少选项数
    min_option_count: usize,
    state: AssemblerState,
    finished: Vec<CandidateQuestion>,
}

impl RecordAssembler {
    /// 为一个文档创建装配器
    pub fn new(source: impl Into<String>, allow_block: bool, min_option_count: usize) -> Result<Self> {
        Ok(Self {
            bank: GrammarBank::new()?,
            source: source.into(),
            allow_block,
            min_option_count,
            state: AssemblerState::Idle,
            finished: Vec::new(),
        })
    }

    /// 喂入一行（调用方保证已去除首尾空白、非空）
    pub fn feed(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, AssemblerState::Idle);
        self.state = match state {
            AssemblerState::Idle => self.feed_idle(line),
            AssemblerState::Open {
                grammar,
                candidate,
                family,
            } => self.feed_open(grammar, candidate, family, line),
            AssemblerState::Block { buffer } => self.feed_block(buffer, line),
        };
    }

    /// 输入结束，收尾最后一道题并取出全部候选
    pub fn finish(mut self) -> Vec<CandidateQuestion> {
        match std::mem::replace(&mut self.state, AssemblerState::Idle) {
            AssemblerState::Open { candidate, .. } => self.close_candidate(candidate),
            // 没等到收尾数字的块不成题
            AssemblerState::Block { buffer } => {
                if !buffer.is_empty() {
                    debug!("[{}] 丢弃未确认的块缓冲（{} 行）", self.source, buffer.len());
                }
            }
            AssemblerState::Idle => {}
        }
        self.finished
    }

    // ========== 状态转移 ==========

    fn feed_idle(&mut self, line: &str) -> AssemblerState {
        match self.bank.match_question_start(line, self.allow_block) {
            Some(start) if start.kind == GrammarKind::Block => AssemblerState::Block {
                buffer: vec![start.text],
            },
            Some(start) => {
                debug!("[{}] 锁定文法 {}: {}", self.source, start.kind.name(), start.text);
                AssemblerState::Open {
                    grammar: start.kind,
                    candidate: CandidateQuestion::open(start.text, &self.source),
                    family: None,
                }
            }
            // 题目之外的行（封面、说明等）直接忽略
            None => AssemblerState::Idle,
        }
    }

    fn feed_open(
        &mut self,
        grammar: GrammarKind,
        mut candidate: CandidateQuestion,
        family: Option<OptionFamily>,
        line: &str,
    ) -> AssemblerState {
        // 1. 选项：未满 4 个且符号族一致时优先于题干起始，
        //    否则 "2) 选项" 这类数字选项会被误读成新题。
        //    族不一致的行（字母选项之后的 "2. xxx"）落到题干起始判定，
        //    选项残缺的上一题不吞掉下一题的题干
        if candidate.options.len() < 4 {
            if let Some(option) = self.bank.match_option(grammar, line) {
                if family.map_or(true, |f| f == option.family) {
                    candidate.push_option(option.text);
                    return AssemblerState::Open {
                        grammar,
                        candidate,
                        family: Some(option.family),
                    };
                }
            }
        }

        // 2. 答案
        if let Some(index) = self.bank.match_answer(grammar, line) {
            candidate.correct_index = index as i32;
            return AssemblerState::Open {
                grammar,
                candidate,
                family,
            };
        }

        // 3. 新题干起始：收尾当前题，重新执行锁定规则
        if let Some(start) = self.bank.match_question_start(line, self.allow_block) {
            self.close_candidate(candidate);
            return match start.kind {
                GrammarKind::Block => AssemblerState::Block {
                    buffer: vec![start.text],
                },
                kind => AssemblerState::Open {
                    grammar: kind,
                    candidate: CandidateQuestion::open(start.text, &self.source),
                    family: None,
                },
            };
        }

        // 4. 选项开始前的普通行并入题干；选项开始后的杂行丢弃，
        //    避免尾部噪声污染题干
        if candidate.options.is_empty() && !self.bank.is_boilerplate(line) {
            candidate.append_question_text(line);
        }
        AssemblerState::Open {
            grammar,
            candidate,
            family,
        }
    }

    fn feed_block(&mut self, mut buffer: Vec<String>, line: &str) -> AssemblerState {
        // 缓冲至少 5 行（题号 + 题干 + 4 选项）之后出现的裸 1-4
        // 才是收尾答案，否则只是普通缓冲行
        if let Some(value) = self.bank.bare_integer(line) {
            if (1..=4).contains(&value) && buffer.len() >= 5 {
                self.close_block(&mut buffer, value as u32);
                return AssemblerState::Block { buffer };
            }
        }
        buffer.push(line.to_string());
        AssemblerState::Block { buffer }
    }

    // ========== 收尾 ==========

    /// 收尾 standard / roman 候选题目
    ///
    /// 选项不足最少数量的候选直接丢弃；没等到答案行的候选
    /// 默认第 1 个选项（宽松策略，留给校验阶段审计）。
    fn close_candidate(&mut self, mut candidate: CandidateQuestion) {
        if candidate.options.len() < self.min_option_count {
            debug!(
                "[{}] 丢弃选项不足的候选（{} 个选项）: {}",
                self.source,
                candidate.options.len(),
                preview(&candidate.question)
            );
            return;
        }
        if !candidate.has_answer() {
            warn!(
                "[{}] ⚠️ 未找到答案行，默认第 1 个选项: {}",
                self.source,
                preview(&candidate.question)
            );
            candidate.correct_index = 0;
        }
        self.finished.push(candidate);
    }

    /// 收尾一个确认的块：倒序弹出末 4 行作选项，其余并入题干
    fn close_block(&mut self, buffer: &mut Vec<String>, answer_value: u32) {
        let mut options = Vec::with_capacity(4);
        for _ in 0..4 {
            if let Some(line) = buffer.pop() {
                options.push(line);
            }
        }
        options.reverse();

        // 剩余行是题干，开头的裸题号剥掉
        let mut question_lines = std::mem::take(buffer);
        if question_lines
            .first()
            .map(|l| self.bank.bare_integer(l).is_some())
            .unwrap_or(false)
        {
            question_lines.remove(0);
        }

        let mut candidate = CandidateQuestion::open(question_lines.join(" "), &self.source);
        for option in options {
            candidate.push_option(option);
        }
        candidate.correct_index = (answer_value - 1) as i32;
        self.finished.push(candidate);
    }
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

    fn assemble(lines: &[&str], source: &str, allow_block: bool) -> Vec<CandidateQuestion> {
        let mut assembler = RecordAssembler::new(source, allow_block, 2).unwrap();
        for line in lines {
            assembler.feed(line);
        }
        assembler.finish()
    }

    #[test]
    fn test_standard_document() {
        let records = assemble(
            &["1. What is risk?", "a) Peril", "b) Hazard", "c) Loss", "d) None", "Ans: b"],
            "mock.pdf",
            false,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "What is risk?");
        assert_eq!(records[0].options, vec!["Peril", "Hazard", "Loss", "None"]);
        assert_eq!(records[0].correct_index, 1);
    }

    #[test]
    fn test_question_continuation_lines() {
        let records = assemble(
            &[
                "1. An insurance contract",
                "is best described as?",
                "a) Unilateral",
                "b) Bilateral",
                "c) Mutual",
                "d) None",
                "Ans: a",
            ],
            "mock.pdf",
            false,
        );
        assert_eq!(records[0].question, "An insurance contract is best described as?");
        assert_eq!(records[0].correct_index, 0);
    }

    #[test]
    fn test_grammar_lock_in_mixed_document() {
        // standard 题后紧跟 roman 题，两题各自成段，选项互不串扰
        let records = assemble(
            &[
                "1. What is risk?",
                "a) Peril",
                "b) Hazard",
                "c) Loss",
                "d) None",
                "Ans: b",
                "Q2: Who regulates insurers?",
                "I. IRDA",
                "II. SEBI",
                "III. RBI",
                "IV. None",
                "Answer: I",
            ],
            "mixed.pdf",
            false,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].options, vec!["Peril", "Hazard", "Loss", "None"]);
        assert_eq!(records[0].correct_index, 1);
        assert_eq!(records[1].question, "Who regulates insurers?");
        assert_eq!(records[1].options, vec!["IRDA", "SEBI", "RBI", "None"]);
        assert_eq!(records[1].correct_index, 0);
    }

    #[test]
    fn test_block_document() {
        let records = assemble(
            &["12", "What is IRDA?", "Regulator", "Insurer", "Broker", "Agent", "1"],
            "Life-Question Bank_28032023.pdf",
            true,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "What is IRDA?");
        assert_eq!(records[0].options, vec!["Regulator", "Insurer", "Broker", "Agent"]);
        assert_eq!(records[0].correct_index, 0);
    }

    #[test]
    fn test_block_consecutive_questions() {
        let records = assemble(
            &[
                "12", "What is IRDA?", "Regulator", "Insurer", "Broker", "Agent", "1",
                "13", "Who pays premium?", "Insured", "Insurer", "Agent", "Court", "2",
            ],
            "Life-Question Bank.pdf",
            true,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].question, "Who pays premium?");
        assert_eq!(records[1].correct_index, 1);
    }

    #[test]
    fn test_missing_answer_defaults_to_first_option() {
        let records = assemble(
            &["1. Which of these is a peril?", "a) Fire", "b) Sea", "c) Road", "d) Cargo"],
            "legacy.docx",
            false,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correct_index, 0);
    }

    #[test]
    fn test_too_few_options_discarded() {
        let records = assemble(
            &["1. A fragment of a question?", "a) Lonely option", "5. Full question here?",
              "a) W", "b) X", "c) Y", "d) Z", "Ans: c"],
            "mock.pdf",
            false,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correct_index, 2);
    }

    #[test]
    fn test_noise_after_options_dropped() {
        let records = assemble(
            &[
                "1. What is risk?",
                "a) Peril",
                "b) Hazard",
                "c) Loss",
                "d) None",
                "some stray footer text",
                "Ans: d",
            ],
            "mock.pdf",
            false,
        );
        assert_eq!(records.len(), 1);
        // 选项开始后出现的杂行既不进题干也不进选项
        assert_eq!(records[0].question, "What is risk?");
        assert_eq!(records[0].options.len(), 4);
        assert_eq!(records[0].correct_index, 3);
    }

    #[test]
    fn test_boilerplate_never_joins_question() {
        let records = assemble(
            &[
                "1. What is subrogation",
                "Page 3 of 12",
                "in a claim settlement?",
                "a) A right",
                "b) A duty",
                "c) A form",
                "d) None",
                "Ans: a",
            ],
            "mock.pdf",
            false,
        );
        assert_eq!(
            records[0].question,
            "What is subrogation in a claim settlement?"
        );
    }

    #[test]
    fn test_digit_options_not_misread_as_questions() {
        let records = assemble(
            &["1. What is risk?", "1) Peril", "2) Hazard", "3) Loss", "4) None", "Ans: 2"],
            "mock.pdf",
            false,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].options, vec!["Peril", "Hazard", "Loss", "None"]);
        assert_eq!(records[0].correct_index, 1);
    }

    #[test]
    fn test_new_question_after_partial_letter_options_not_swallowed() {
        // 残缺的上一题只有 3 个字母选项时，"2. xxx" 是新题干，
        // 不是第 4 个选项
        let records = assemble(
            &[
                "1. What is the main purpose of insurance?",
                "a) Risk transfer",
                "b) Gambling",
                "c) Savings",
                "2. What distinguishes term insurance from whole life insurance?",
                "a) Duration of coverage",
                "b) Color of document",
                "c) Font size",
                "d) Paper weight",
                "Ans: b",
            ],
            "mock.pdf",
            false,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].options,
            vec!["Risk transfer", "Gambling", "Savings"]
        );
        assert_eq!(
            records[1].question,
            "What distinguishes term insurance from whole life insurance?"
        );
        assert_eq!(records[1].options.len(), 4);
        assert_eq!(records[1].correct_index, 1);
    }

    #[test]
    fn test_unconfirmed_block_discarded_at_eof() {
        let records = assemble(
            &["12", "What is IRDA?", "Regulator", "Insurer"],
            "Life-Question Bank.pdf",
            true,
        );
        assert!(records.is_empty());
    }
}
