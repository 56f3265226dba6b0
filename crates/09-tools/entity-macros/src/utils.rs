//! 宏工具函数

use proc_macro2::Span;
use syn::{Attribute, Ident};

/// 检查属性路径的最后一段是否为指定名称
///
/// 同时匹配 `#[entity]` 与 `#[entity_automapping::entity]`。
pub fn is_attribute(attr: &Attribute, name: &str) -> bool {
    attr.path()
        .segments
        .last()
        .map(|segment| segment.ident == name)
        .unwrap_or(false)
}

/// 生成注册函数名，如 `__register_entity_order_line`
pub fn registration_fn_name(ident: &Ident) -> Ident {
    Ident::new(
        &format!("__register_entity_{}", to_snake_case(&ident.to_string())),
        Span::call_site(),
    )
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}
