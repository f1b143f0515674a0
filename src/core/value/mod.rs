//! Value 模块 - 查询结果值类型系统
//!
//! - 核心类型定义 (`types.rs`)
//! - 比较逻辑 (`comparison.rs`)
//! - 类型转换 (`conversion.rs`)

pub mod comparison;
pub mod conversion;
pub mod types;

pub use comparison::{compare_values, sort_order, values_equal};
pub use conversion::ValueConversionError;
pub use types::*;
