//! 题库编号与落盘 - 业务能力层
//!
//! 职责：
//! - 给通过校验的题目按顺序编号（id 从 1 开始）
//! - 填充 previous / next 链式指针
//! - 以 4 空格缩进的 JSON 原子写入输出文件（临时文件 + 改名）

use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::fs;
use tracing::info;

use crate::error::BankError;
use crate::models::{BankQuestion, CandidateQuestion};

/// 按输入顺序编号并补链式指针
///
/// 第一题 previous 为 null，最后一题 next 为 null。
pub fn index_records(candidates: Vec<CandidateQuestion>) -> Vec<BankQuestion> {
    let total = candidates.len() as u32;
    candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let id = i as u32 + 1;
            BankQuestion {
                id,
                question: c.question,
                options: c.options,
                correct_index: c.correct_index as u32,
                explanation: c.explanation,
                previous: if id > 1 { Some(id - 1) } else { None },
                next: if id < total { Some(id + 1) } else { None },
            }
        })
        .collect()
}

/// 题库写入器
pub struct BankWriter {
    output_file: PathBuf,
}

impl BankWriter {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    /// 序列化并原子写入
    ///
    /// 先写到同目录的临时文件，再改名覆盖目标文件，
    /// 读者永远看不到写了一半的题库。
    pub async fn write(&self, questions: &[BankQuestion]) -> Result<(), BankError> {
        let payload = to_pretty_json(questions)?;

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| BankError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        let tmp = self.output_file.with_extension("json.tmp");
        fs::write(&tmp, &payload)
            .await
            .map_err(|source| BankError::Write {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, &self.output_file)
            .await
            .map_err(|source| BankError::Rename {
                from: tmp.clone(),
                to: self.output_file.clone(),
                source,
            })?;

        info!(
            "💾 题库已写入: {} ({} 题)",
            self.output_file.display(),
            questions.len()
        );
        Ok(())
    }
}

/// 4 空格缩进的 JSON 序列化
fn to_pretty_json(questions: &[BankQuestion]) -> Result<Vec<u8>, BankError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    questions
        .serialize(&mut serializer)
        .map_err(|source| BankError::Serialize { source })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateQuestion;

    fn candidate(question: &str) -> CandidateQuestion {
        let mut c = CandidateQuestion::open(question, "test.pdf");
        for i in 0..4 {
            c.push_option(format!("Option {}", i + 1));
        }
        c.correct_index = 0;
        c
    }

    #[test]
    fn test_index_records_links() {
        let bank = index_records(vec![
            candidate("What is the first question?"),
            candidate("What is the second question?"),
            candidate("What is the third question?"),
        ]);
        assert_eq!(bank.len(), 3);
        assert_eq!(bank[0].id, 1);
        assert_eq!(bank[0].previous, None);
        assert_eq!(bank[0].next, Some(2));
        assert_eq!(bank[1].previous, Some(1));
        assert_eq!(bank[1].next, Some(3));
        assert_eq!(bank[2].id, 3);
        assert_eq!(bank[2].previous, Some(2));
        assert_eq!(bank[2].next, None);
    }

    #[test]
    fn test_index_records_single() {
        let bank = index_records(vec![candidate("What is the only question?")]);
        assert_eq!(bank[0].previous, None);
        assert_eq!(bank[0].next, None);
    }

    #[test]
    fn test_pretty_json_uses_four_space_indent() {
        let bank = index_records(vec![candidate("What is the only question?")]);
        let payload = to_pretty_json(&bank).unwrap();
        let text = String::from_utf8(payload).unwrap();
        assert!(text.contains("    \"id\": 1"));
        assert!(text.contains("\"correctIndex\": 0"));
    }

    #[tokio::test]
    async fn test_atomic_write_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("questions.json");
        let writer = BankWriter::new(&path);
        let bank = index_records(vec![candidate("What is the only question?")]);

        writer.write(&bank).await.unwrap();
        let text = fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<BankQuestion> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);

        // 重写同一内容应产生完全相同的字节
        writer.write(&bank).await.unwrap();
        let second = fs::read_to_string(&path).await.unwrap();
        assert_eq!(text, second);
    }
}
