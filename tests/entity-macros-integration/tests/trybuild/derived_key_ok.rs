use entity_automapping::{entity, global_catalog, PrimaryKey};
use std::any::TypeId;

pub trait SoftDelete {}

#[entity(abstract, key = u32, implements = dyn SoftDelete)]
struct EntityBase;

#[entity(extends = EntityBase, key = <EntityBase as PrimaryKey>::Key)]
struct Tenant;

fn main() {
    let catalog = global_catalog();

    let base = catalog.find(TypeId::of::<EntityBase>()).unwrap();
    assert!(!base.is_concrete());
    assert!(base.repositories.is_empty());

    let tenant = catalog.find(TypeId::of::<Tenant>()).unwrap();
    assert_eq!(tenant.bases.len(), 1);
    assert!(tenant.repositories[0].key.is::<u32>());
}
