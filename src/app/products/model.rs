//! 产品数据模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 过期日期格式：日/月/年
pub const EXPIRATION_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

/// 创建产品请求
///
/// 缺失的字段取零值，由校验逻辑统一报告。
/// `id` 与 `is_published` 由目录分配，请求中携带的值会被忽略。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub expiration: String,
    pub price: f64,
}

impl NewProduct {
    /// 返回所有缺失（零值）的必填字段
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.quantity == 0 {
            missing.push("quantity");
        }
        if self.code_value.is_empty() {
            missing.push("code_value");
        }
        if self.expiration.is_empty() {
            missing.push("expiration");
        }
        if self.price == 0.0 {
            missing.push("price");
        }
        missing
    }

    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            code_value: self.code_value,
            is_published: false,
            expiration: self.expiration,
            price: self.price,
        }
    }
}

/// 严格解析 DD/MM/YYYY，日和月必须是两位数字，年必须是四位数字
pub fn parse_expiration(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, EXPIRATION_FORMAT).ok()
}

/// 价格查询参数
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    #[serde(default)]
    pub price: Option<String>,
}
