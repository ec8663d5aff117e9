//! # Extract Question Bank
//!
//! 从考试素材（PDF / DOCX / TXT / 电子表格）里提取四选一选择题，
//! 汇成一份可复现的 JSON 题库。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 把各种文件格式变成统一的原料
//! - `text_decoder` - PDF / DOCX / TXT → 纯文本
//! - `sheet_reader` - XLSX / XLS → 表头键入的行
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份原料
//! - `RecordAssembler` - 行流 → 候选题目（语法库状态机）
//! - `row_mapper` - 表格行 → 候选题目
//! - `Validator` - 结构校验 + 整轮去重
//! - `BankWriter` - 编号 + 原子落盘
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个素材文件"的完整处理流程
//! - `SourceCtx` - 上下文封装（路径 + 类别 + 版式标记）
//! - `SourceFlow` - 流程编排（取文本 → 切行 → 组装 / 读表 → 映射）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量素材处理器，排序扫描、
//!   顺序处理、整轮收尾

pub mod config;
pub mod error;
pub mod grammar;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{BankError, ConfigError, DecodeError, SheetError};
pub use grammar::{GrammarBank, GrammarKind};
pub use models::{BankQuestion, CandidateQuestion};
pub use orchestrator::App;
pub use services::{RecordAssembler, Validator};
pub use workflow::{SourceCtx, SourceFlow, SourceKind};
