use entity_automapping::{entity, global_catalog, not_mapped, NotMapped};
use std::any::TypeId;

#[entity(key = i64)]
#[not_mapped]
struct CustomerView;

#[not_mapped]
#[entity(key = i64)]
struct OrderSnapshot;

#[not_mapped]
struct Scratch;

fn assert_not_mapped<T: NotMapped>() {}

fn main() {
    assert_not_mapped::<CustomerView>();
    assert_not_mapped::<OrderSnapshot>();
    assert_not_mapped::<Scratch>();

    let catalog = global_catalog();
    assert!(catalog.find(TypeId::of::<CustomerView>()).unwrap().not_mapped);
    assert!(catalog.find(TypeId::of::<OrderSnapshot>()).unwrap().not_mapped);
    assert!(catalog.find(TypeId::of::<Scratch>()).is_none());
}
