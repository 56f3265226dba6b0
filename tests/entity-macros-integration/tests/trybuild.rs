//! trybuild compile-time tests for entity_macros

#[test]
fn trybuild_entity_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/entity_ok.rs");
    t.pass("tests/trybuild/not_mapped_ok.rs");
    t.pass("tests/trybuild/derived_key_ok.rs");
    t.pass("tests/trybuild/inherited_key_ok.rs");
}
