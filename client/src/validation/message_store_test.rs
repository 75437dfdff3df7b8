use super::*;
use crate::validation::ModelRef;

fn setup() -> (EditContext, ValidationMessageStore) {
    let ctx = EditContext::new(ModelRef::new());
    let store = ValidationMessageStore::new(&ctx);
    (ctx, store)
}

#[test]
fn add_keeps_messages_in_order() {
    let (ctx, store) = setup();
    let password = ctx.field("Password");
    store.add(&password, "Too short");
    store.add(&password, "Needs a digit");
    assert_eq!(store.messages_for(&password), vec!["Too short".to_owned(), "Needs a digit".to_owned()]);
}

#[test]
fn add_range_with_nothing_creates_no_entry() {
    let (ctx, store) = setup();
    store.add_range(&ctx.field("Email"), Vec::<String>::new());
    assert!(store.is_empty());
    assert!(store.fields().is_empty());
}

#[test]
fn clear_field_leaves_other_fields() {
    let (ctx, store) = setup();
    let email = ctx.field("Email");
    let password = ctx.field("Password");
    store.add(&email, "Required");
    store.add(&password, "Required");
    store.clear_field(&email);
    assert!(store.messages_for(&email).is_empty());
    assert_eq!(store.messages_for(&password), vec!["Required".to_owned()]);
    assert_eq!(store.fields(), vec![password]);
}

#[test]
fn clear_empties_everything() {
    let (ctx, store) = setup();
    store.add(&ctx.field("Email"), "Required");
    store.add(&ctx.field("Password"), "Required");
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn clones_share_messages() {
    let (ctx, store) = setup();
    let other = store.clone();
    other.add(&ctx.field("Email"), "Required");
    assert!(!store.is_empty());
}
