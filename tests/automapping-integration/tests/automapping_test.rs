//! Centralized integration tests for entity-automapping
//!
//! 实体通过 `#[entity]` 声明，描述符在测试进程启动前提交到全局类型目录。

use di_abstractions::{
    DiContainer, ServiceDescriptor, ServiceRegistry, ServiceRegistryExt, ServiceResolverExt,
};
use infrastructure_common::DependencyError;
use di_impl::DiContainerImpl;
use entity_automapping::{
    attach_entities_to_model, attach_entity_types, attach_identity_entities, entity,
    global_catalog, not_mapped, register_entity_repositories, AutoMappingOptions, Constraint,
    ContractDefinition, DbContext, EntityModel, MappingError, ModelDbContext, NotMapped, PersistenceModel, PrimaryKey, Repository, TypeInfo,
    TypeScanner,
};
use std::any::TypeId;
use std::sync::Arc;

const THIS_CRATE: &str = env!("CARGO_PKG_NAME");

pub trait Auditable {}

/// 需要变更追踪的实体
pub enum Tracked {}

impl ContractDefinition for Tracked {
    const NAME: &'static str = "Tracked";
}

#[entity(abstract, key = i64, implements = dyn Auditable)]
pub struct AuditedEntity;

#[entity(key = i64, extends = AuditedEntity)]
pub struct Customer;

#[entity(extends = Customer, implements = dyn Auditable, key = <Customer as PrimaryKey>::Key)]
pub struct VipCustomer;

#[entity(extends = Customer)]
pub struct GuestCustomer;

#[entity(key = String, key = u64, implements = Tracked)]
pub struct Invoice;

#[entity(implements = Tracked)]
pub struct Shipment;

#[entity(key = i64)]
#[not_mapped]
pub struct CustomerView;

#[not_mapped]
#[entity(key = i64)]
pub struct OrderSnapshot;

#[entity(extends = OrderSnapshot)]
pub struct ArchivedOrderSnapshot;

#[entity(implements = dyn Auditable, name = "AuditTrail")]
pub struct AuditLog;

fn sorted_names(constraint: &Constraint, filter: Option<&str>) -> Vec<String> {
    let catalog = global_catalog();
    let mut names: Vec<String> = TypeScanner::new(&catalog)
        .scan(constraint, filter)
        .into_iter()
        .map(|descriptor| descriptor.type_info.name.clone())
        .collect();
    names.sort();
    names
}

fn container_with_context(context: ModelDbContext) -> DiContainerImpl {
    let mut container = DiContainerImpl::new();
    container
        .register(ServiceDescriptor::instance(Arc::new(context)))
        .unwrap();
    container
}

fn assert_not_mapped<T: NotMapped>() {}

#[test]
fn test_identity_scan_returns_each_entity_once() {
    let expected = vec!["Customer", "GuestCustomer", "Invoice", "VipCustomer"];
    assert_eq!(sorted_names(&Constraint::identity(), None), expected);
    assert_eq!(sorted_names(&Constraint::identity(), None), expected);
    assert_eq!(sorted_names(&Constraint::identity(), Some(THIS_CRATE)), expected);
}

#[test]
fn test_not_mapped_in_either_order_is_excluded() {
    assert_not_mapped::<CustomerView>();
    assert_not_mapped::<OrderSnapshot>();

    let catalog = global_catalog();
    for type_id in [TypeId::of::<CustomerView>(), TypeId::of::<OrderSnapshot>()] {
        let descriptor = catalog.find(type_id).unwrap();
        assert!(descriptor.not_mapped);
        assert!(descriptor.is_concrete());
    }

    let names = sorted_names(&Constraint::identity(), None);
    assert!(!names.contains(&"CustomerView".to_string()));
    assert!(!names.contains(&"OrderSnapshot".to_string()));
}

#[test]
fn test_abstract_types_are_never_returned() {
    let catalog = global_catalog();
    assert!(!catalog.find(TypeId::of::<AuditedEntity>()).unwrap().is_concrete());

    for constraint in [
        Constraint::identity(),
        Constraint::contract::<dyn Auditable>(),
        Constraint::base_type::<AuditedEntity>(),
    ] {
        assert!(!sorted_names(&constraint, None).contains(&"AuditedEntity".to_string()));
    }
}

#[test]
fn test_base_type_constraint_is_transitive() {
    assert_eq!(
        sorted_names(&Constraint::base_type::<AuditedEntity>(), None),
        vec!["Customer", "GuestCustomer", "VipCustomer"]
    );
    assert_eq!(
        sorted_names(&Constraint::base_type::<Customer>(), None),
        vec!["GuestCustomer", "VipCustomer"]
    );
}

#[test]
fn test_inherited_contracts_count() {
    assert_eq!(
        sorted_names(&Constraint::contract::<dyn Auditable>(), None),
        vec!["AuditTrail", "Customer", "GuestCustomer", "VipCustomer"]
    );
}

#[test]
fn test_primary_key_is_generated_for_single_key() {
    assert!(TypeInfo::of::<<Customer as PrimaryKey>::Key>().is::<i64>());
    assert!(TypeInfo::of::<<VipCustomer as PrimaryKey>::Key>().is::<i64>());
    assert!(TypeInfo::of::<<GuestCustomer as PrimaryKey>::Key>().is::<i64>());
}

#[test]
fn test_exclusion_marker_is_inherited_by_derived_types() {
    let catalog = global_catalog();
    let archived = catalog.find(TypeId::of::<ArchivedOrderSnapshot>()).unwrap();
    assert!(!archived.not_mapped);
    assert!(TypeScanner::new(&catalog).is_excluded(archived));

    assert!(sorted_names(&Constraint::base_type::<OrderSnapshot>(), None).is_empty());
    assert!(!sorted_names(&Constraint::identity(), None).contains(&"ArchivedOrderSnapshot".to_string()));
}

#[test]
fn test_derived_entity_without_declared_key_is_registered() -> anyhow::Result<()> {
    let mut model = EntityModel::new();
    attach_identity_entities(&mut model, Some(THIS_CRATE))?;
    let guest = model.find_entity_type(TypeId::of::<GuestCustomer>()).unwrap();
    assert!(guest.key.as_ref().unwrap().is::<i64>());

    let mut container = container_with_context(ModelDbContext::new("shop", model));
    register_entity_repositories::<ModelDbContext>(&mut container, Some(THIS_CRATE))?;

    let repository = container.resolve::<dyn Repository<GuestCustomer, i64>>()?;
    assert!(repository.is_mapped());
    Ok(())
}

#[test]
fn test_contract_definition_binds_model() -> anyhow::Result<()> {
    let mut model = EntityModel::new();
    assert_eq!(attach_entity_types::<Tracked>(&mut model, None)?, 2);

    let mut names: Vec<String> = model
        .entity_types()
        .into_iter()
        .map(|entity_type| entity_type.type_info.name.clone())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Invoice", "Shipment"]);

    let shipment = model.find_entity_type(TypeId::of::<Shipment>()).unwrap();
    assert_eq!(shipment.key, None);

    assert_eq!(attach_entity_types::<Tracked>(&mut model, None)?, 0);
    assert_eq!(model.entity_types().len(), 2);
    Ok(())
}

#[test]
fn test_model_binding_is_idempotent() -> anyhow::Result<()> {
    let mut model = EntityModel::new();
    assert_eq!(attach_identity_entities(&mut model, None)?, 4);
    let once: Vec<_> = model.entity_types().into_iter().cloned().collect();

    assert_eq!(attach_identity_entities(&mut model, None)?, 0);
    let twice: Vec<_> = model.entity_types().into_iter().cloned().collect();
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_model_binding_pins_first_declared_key() -> anyhow::Result<()> {
    let mut model = EntityModel::new();
    attach_identity_entities(&mut model, None)?;

    let invoice = model.find_entity_type(TypeId::of::<Invoice>()).unwrap();
    assert!(invoice.key.as_ref().unwrap().is::<String>());
    assert_eq!(invoice.table_name, "invoice");

    let vip = model.find_entity_type(TypeId::of::<VipCustomer>()).unwrap();
    assert!(vip.key.as_ref().unwrap().is::<i64>());
    assert_eq!(vip.table_name, "vip_customer");
    Ok(())
}

#[test]
fn test_non_identity_constraint_binds_model() -> anyhow::Result<()> {
    let mut model = EntityModel::new();
    let added = attach_entities_to_model(&mut model, &Constraint::contract::<dyn Auditable>(), None)?;
    assert_eq!(added, 4);

    let audit = model.find_entity_type(TypeId::of::<AuditLog>()).unwrap();
    assert_eq!(audit.key, None);
    assert_eq!(audit.table_name, "audit_trail");
    Ok(())
}

#[test]
fn test_repository_registration_is_idempotent() -> anyhow::Result<()> {
    let mut container = container_with_context(ModelDbContext::new("shop", EntityModel::new()));

    let first = register_entity_repositories::<ModelDbContext>(&mut container, None)?;
    assert_eq!(first.registered.len(), 4);
    assert!(first.skipped.is_empty());

    let second = register_entity_repositories::<ModelDbContext>(&mut container, None)?;
    assert!(second.registered.is_empty());
    assert_eq!(second.skipped.len(), 4);

    assert_eq!(container.len(), 5);
    assert!(container.is_registered::<dyn Repository<Customer, i64>>());
    assert!(container.is_registered::<dyn Repository<VipCustomer, i64>>());
    assert!(container.is_registered::<dyn Repository<Invoice, String>>());
    assert!(!container.is_registered::<dyn Repository<Invoice, u64>>());
    assert!(!container.is_registered::<dyn Repository<CustomerView, i64>>());
    Ok(())
}

#[test]
fn test_registered_repositories_resolve_over_context() -> anyhow::Result<()> {
    let context = ModelDbContext::build("shop", |model| {
        attach_identity_entities(model, Some(THIS_CRATE))?;
        Ok(())
    })?;
    let mut container = container_with_context(context);
    register_entity_repositories::<ModelDbContext>(&mut container, Some(THIS_CRATE))?;

    let first = container.resolve::<dyn Repository<Customer, i64>>()?;
    let second = container.resolve::<dyn Repository<Customer, i64>>()?;
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.context().name(), "shop");
    assert!(first.is_mapped());

    let implementations: Vec<String> = container
        .registrations()
        .into_iter()
        .map(|descriptor| descriptor.implementation)
        .filter(|implementation| implementation.starts_with("EfRepository"))
        .collect();
    assert!(implementations.contains(&"EfRepository<ModelDbContext, Invoice, String>".to_string()));
    Ok(())
}

#[test]
fn test_scoped_context_is_shared_within_scope() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::scoped::<ModelDbContext, _>(|_| {
        Ok(Arc::new(ModelDbContext::new("unit-of-work", EntityModel::new())))
    }))?;
    register_entity_repositories::<ModelDbContext>(&mut container, Some(THIS_CRATE))?;

    let root = container.resolve::<dyn Repository<Customer, i64>>();
    assert!(matches!(root, Err(DependencyError::ScopeMismatch { .. })));

    let scope = container.create_scope();
    let customers = scope.resolve::<dyn Repository<Customer, i64>>()?;
    let invoices = scope.resolve::<dyn Repository<Invoice, String>>()?;
    assert!(Arc::ptr_eq(&customers.context(), &invoices.context()));

    let other = container.create_scope();
    let elsewhere = other.resolve::<dyn Repository<Customer, i64>>()?;
    assert!(!Arc::ptr_eq(&customers.context(), &elsewhere.context()));
    assert_eq!(elsewhere.context().name(), "unit-of-work");
    Ok(())
}

#[test]
fn test_unmatched_filter_is_a_silent_no_op() -> anyhow::Result<()> {
    let options = AutoMappingOptions::default().with_filter("no-such-crate");

    let mut model = EntityModel::new();
    assert_eq!(attach_identity_entities(&mut model, options.filter())?, 0);
    assert!(model.is_empty());

    let mut container = container_with_context(ModelDbContext::new("shop", EntityModel::new()));
    let report = register_entity_repositories::<ModelDbContext>(&mut container, options.filter())?;
    assert_eq!(report.total(), 0);
    assert_eq!(container.len(), 1);
    Ok(())
}

#[test]
fn test_whitespace_filter_scans_everything() {
    assert_eq!(sorted_names(&Constraint::identity(), Some("  ")).len(), 4);
}

#[test]
fn test_missing_context_surfaces_at_resolution() {
    let mut container = DiContainerImpl::new();
    let result: Result<_, MappingError> = register_entity_repositories::<ModelDbContext>(&mut container, None);
    assert!(result.is_ok());
    assert!(container.resolve::<dyn Repository<Invoice, String>>().is_err());
}
