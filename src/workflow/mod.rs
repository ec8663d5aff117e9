//! 流程层
//!
//! 定义单个素材文件的处理流程，组合业务能力层的组件。

pub mod source_ctx;
pub mod source_flow;

pub use source_ctx::{SourceCtx, SourceKind};
pub use source_flow::SourceFlow;
