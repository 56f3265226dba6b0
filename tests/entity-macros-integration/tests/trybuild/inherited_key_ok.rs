use entity_automapping::{entity, global_catalog, Entity, PrimaryKey};
use std::any::TypeId;

#[entity(abstract, key = u32)]
struct EntityBase;

#[entity(extends = EntityBase)]
struct Tenant;

#[entity(extends = Tenant)]
struct TrialTenant;

fn assert_identity<E: Entity<u32> + PrimaryKey<Key = u32>>() {}

fn main() {
    assert_identity::<Tenant>();
    assert_identity::<TrialTenant>();

    let catalog = global_catalog();
    let tenant = catalog.find(TypeId::of::<Tenant>()).unwrap();
    assert!(tenant.contracts.is_empty());
    assert_eq!(tenant.repositories.len(), 1);
    assert!(tenant.repositories[0].key.is::<u32>());

    let trial = catalog.find(TypeId::of::<TrialTenant>()).unwrap();
    assert!(trial.repositories[0].key.is::<u32>());
}
