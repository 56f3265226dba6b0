//! 示例领域模型
//!
//! 实体只通过类型目录被使用，不会在示例中直接构造。

#![allow(dead_code)]

use entity_automapping::{entity, not_mapped, PrimaryKey};

/// 需要审计的实体
pub trait Auditable {}

/// 审计实体基类型
#[entity(abstract, key = i64, implements = dyn Auditable)]
pub struct AuditedEntity;

/// 客户
#[entity(key = i64, extends = AuditedEntity)]
pub struct Customer;

/// 订单
#[entity(key = u64, extends = AuditedEntity)]
pub struct Order;

/// 订单行，主键沿用订单
#[entity(key = <Order as PrimaryKey>::Key)]
pub struct OrderLine;

/// 发票同时支持业务编号与流水号，仓储按第一个声明的主键注册
#[entity(key = String, key = u64)]
pub struct Invoice;

/// 报表视图，不参与映射
#[not_mapped]
#[entity(key = i64)]
pub struct CustomerReport;
