//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SourceCtx>，整轮去重与落盘)
//!     ↓
//! workflow::SourceFlow (处理单个素材文件)
//!     ↓
//! services (能力层：assembler / row_mapper / validator / bank_writer)
//!     ↓
//! infrastructure (基础设施：text_decoder / sheet_reader)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，SourceFlow 管单个
//! 2. **确定性**：排序扫描 + 顺序处理，保证重跑产出一致
//! 3. **无业务逻辑**：只做调度和统计，不做具体解析判断

pub mod batch_processor;

pub use batch_processor::App;
