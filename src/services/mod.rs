//! 业务能力层
//!
//! 单一职责的服务组件：
//! - assembler: 行流 → 候选题目（语法库状态机）
//! - row_mapper: 表格行 → 候选题目
//! - validator: 结构校验 + 去重
//! - bank_writer: 编号 + 原子落盘

pub mod assembler;
pub mod bank_writer;
pub mod row_mapper;
pub mod validator;

pub use assembler::RecordAssembler;
pub use bank_writer::{index_records, BankWriter};
pub use validator::Validator;
