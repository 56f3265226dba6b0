//! # 示例应用程序
//!
//! 演示实体扫描、持久化模型绑定与泛型仓储自动注册

mod domain;

use anyhow::Context;
use clap::Parser;
use di_abstractions::{DiContainer, ServiceDescriptor, ServiceRegistry, ServiceResolverExt};
use di_impl::DiContainerImpl;
use domain::Customer;
use entity_automapping::{
    attach_identity_entities, global_catalog, register_entity_repositories, AutoMappingOptions,
    Constraint, DbContext, EntityModel, ModelDbContext, PersistenceModel, Repository, TypeScanner,
};
use infrastructure_common::logging::init_tracing;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn ADSP 实体自动映射示例")]
struct Args {
    /// 模块名过滤（子串匹配），覆盖配置文件
    #[arg(short, long)]
    filter: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 输出扫描结果
    #[arg(long)]
    json: bool,
}

/// 扫描结果中的一行
#[derive(Debug, Serialize)]
struct EntityRow {
    entity: String,
    module: String,
    keys: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("启动 Lorn ADSP 实体自动映射示例");

    let mut options = AutoMappingOptions::load(args.config.as_deref()).context("加载自动映射配置失败")?;
    if let Some(filter) = args.filter {
        options = options.with_filter(filter);
    }
    info!("自动映射配置: {:?}", options);

    print_scan(&options, args.json)?;

    let context = if options.attach_to_model {
        ModelDbContext::build("shop", |model| {
            attach_identity_entities(model, options.filter())?;
            Ok(())
        })?
    } else {
        ModelDbContext::new("shop", EntityModel::new())
    };

    for entity_type in context.model().entity_types() {
        println!(
            "模型实体: {} -> 表 {} (主键 {})",
            entity_type.type_info,
            entity_type.table_name,
            entity_type
                .key
                .as_ref()
                .map(|key| key.name.as_str())
                .unwrap_or("-")
        );
    }

    if !options.register_repositories {
        info!("已关闭仓储注册");
        return Ok(());
    }

    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::instance(Arc::new(context)))?;
    let report = register_entity_repositories::<ModelDbContext>(&mut container, options.filter())?;

    for descriptor in container.registrations() {
        println!(
            "服务: {} -> {} ({})",
            descriptor.service, descriptor.implementation, descriptor.lifetime
        );
    }
    println!(
        "仓储注册: 新注册 {} 个, 跳过 {} 个",
        report.registered.len(),
        report.skipped.len()
    );

    // 仓储按工作单元在作用域内解析
    let scope = container.create_scope();
    if let Ok(repository) = scope.resolve::<dyn Repository<Customer, i64>>() {
        println!(
            "作用域 {} 解析 {} 仓储成功: 上下文 {}, 已映射 {}",
            scope.scope().id,
            repository.entity_type(),
            repository.context().name(),
            repository.is_mapped()
        );
    }

    Ok(())
}

/// 打印扫描结果
fn print_scan(options: &AutoMappingOptions, json: bool) -> anyhow::Result<()> {
    let catalog = global_catalog();
    let scanner = TypeScanner::new(&catalog);

    let rows: Vec<EntityRow> = scanner
        .scan(&Constraint::identity(), options.filter())
        .into_iter()
        .map(|descriptor| EntityRow {
            entity: descriptor.type_info.name.clone(),
            module: descriptor.module.full_name(),
            keys: scanner
                .identity_keys(descriptor)
                .into_iter()
                .map(|key| key.name)
                .collect(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("实体: {} [{}] 主键候选 {:?}", row.entity, row.module, row.keys);
        }
    }

    Ok(())
}
