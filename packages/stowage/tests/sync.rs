//! Cross-binding synchronization, driven through the facade.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use stowage::{
    AreaKind, Binding, DeserializeValidator, Environment, FnValidator, ParseError, StorageConfig,
};

fn boolean_schema() -> FnValidator<bool> {
    FnValidator::new(|input| {
        input
            .as_bool()
            .ok_or_else(|| ParseError::new("expected a boolean"))
    })
}

#[test]
fn peer_binding_converges_without_explicit_reads() {
    let env = Rc::new(Environment::in_memory());

    let a = Binding::persistent(&env, StorageConfig::new("volume", 0u32));
    let b = Binding::persistent(&env, StorageConfig::new("volume", 0u32));

    a.set(42);
    assert_eq!(b.get(), 42, "b observes a's write through the hub");
}

#[test]
fn convergence_works_on_the_session_area_too() {
    let env = Rc::new(Environment::in_memory());

    let a = Binding::session(&env, StorageConfig::new("draft", String::new()));
    let b = Binding::session(&env, StorageConfig::new("draft", String::new()));

    a.set("unsent message".to_string());
    assert_eq!(b.get(), "unsent message");
}

#[test]
fn local_writes_re_read_every_same_area_binding() {
    let env = Rc::new(Environment::in_memory());

    let other_key = Binding::persistent(&env, StorageConfig::new("theme", "light".to_string()));
    let refreshes = Rc::new(RefCell::new(0));

    let r = Rc::clone(&refreshes);
    let _watch = other_key.watch(move |_| *r.borrow_mut() += 1);

    // A local write to a *different* key still re-reads this binding: the
    // same-document notice carries no key and is deliberately unfiltered.
    let volume = Binding::persistent(&env, StorageConfig::new("volume", 0u32));
    volume.set(1);

    assert!(*refreshes.borrow() > 0);
    assert_eq!(other_key.get(), "light");
}

#[test]
fn local_writes_do_not_touch_the_other_area() {
    let env = Rc::new(Environment::in_memory());

    let session_binding = Binding::session(&env, StorageConfig::new("volume", 0u32));
    let refreshes = Rc::new(RefCell::new(0));

    let r = Rc::clone(&refreshes);
    let _watch = session_binding.watch(move |_| *r.borrow_mut() += 1);

    let persistent_binding = Binding::persistent(&env, StorageConfig::new("volume", 0u32));
    persistent_binding.set(1);

    assert_eq!(*refreshes.borrow(), 0, "area kinds must not cross-notify");
}

#[test]
fn remote_notices_are_filtered_by_key() {
    let env = Rc::new(Environment::in_memory());
    let binding = Binding::persistent(&env, StorageConfig::new("volume", 0u32));

    let refreshes = Rc::new(RefCell::new(0));
    let r = Rc::clone(&refreshes);
    let _watch = binding.watch(move |_| *r.borrow_mut() += 1);

    // Another document writes a different key: short-circuit, no re-read.
    env.relay_remote_change(AreaKind::Persistent, "theme", None, Some("\"dark\"".into()));
    assert_eq!(*refreshes.borrow(), 0);

    // Another document writes our key: re-read picks the new entry up.
    env.area(AreaKind::Persistent)
        .unwrap()
        .borrow_mut()
        .set_item("volume", "11")
        .unwrap();
    env.relay_remote_change(AreaKind::Persistent, "volume", None, Some("11".into()));

    assert!(*refreshes.borrow() > 0);
    assert_eq!(binding.get(), 11);
}

#[test]
fn boolean_toggle_scenario() {
    // initial = true, schema = boolean, stored text = "false".
    let env = Rc::new(Environment::in_memory());
    env.area(AreaKind::Persistent)
        .unwrap()
        .borrow_mut()
        .set_item("dark_mode", "false")
        .unwrap();

    let a = Binding::persistent(
        &env,
        StorageConfig::new("dark_mode", true).with_schema(boolean_schema()),
    );
    let b = Binding::persistent(
        &env,
        StorageConfig::new("dark_mode", true).with_schema(boolean_schema()),
    );

    assert_eq!(a.get(), false, "stored entry wins over the initial value");

    let (_, set_value) = a.pair();
    set_value.update(|prev| !prev);

    assert_eq!(a.get(), true);
    assert_eq!(b.get(), true, "the peer converges after the toggle");
    assert_eq!(
        env.area(AreaKind::Persistent)
            .unwrap()
            .borrow_mut()
            .get_item("dark_mode")
            .unwrap()
            .as_deref(),
        Some("true")
    );
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    logins: u32,
}

#[test]
fn structured_values_with_a_serde_schema() {
    let env = Rc::new(Environment::in_memory());
    let initial = Profile {
        name: "anonymous".to_string(),
        logins: 0,
    };

    let a = Binding::persistent(
        &env,
        StorageConfig::new("profile", initial.clone())
            .with_schema(DeserializeValidator::<Profile>::new()),
    );
    let b = Binding::persistent(
        &env,
        StorageConfig::new("profile", initial).with_schema(DeserializeValidator::<Profile>::new()),
    );

    a.update(|p| Profile {
        name: "Ada".to_string(),
        logins: p.logins + 1,
    });

    assert_eq!(b.get().name, "Ada");
    assert_eq!(b.get().logins, 1);
}

#[test]
fn schema_rejected_remote_write_degrades_to_initial() {
    let env = Rc::new(Environment::in_memory());
    let binding = Binding::persistent(
        &env,
        StorageConfig::new("dark_mode", true).with_schema(boolean_schema()),
    );

    binding.set(false);
    assert_eq!(binding.get(), false);

    // Another document corrupts the entry; the re-read falls back.
    env.area(AreaKind::Persistent)
        .unwrap()
        .borrow_mut()
        .set_item("dark_mode", "\"hello\"")
        .unwrap();
    env.relay_remote_change(
        AreaKind::Persistent,
        "dark_mode",
        Some("false".into()),
        Some("\"hello\"".into()),
    );

    assert_eq!(binding.get(), true, "corrupt entries revert to the initial");
}

#[test]
fn torn_down_binding_stops_converging() {
    let env = Rc::new(Environment::in_memory());

    let a = Binding::persistent(&env, StorageConfig::new("volume", 0u32));
    let b = Binding::persistent(&env, StorageConfig::new("volume", 0u32));

    a.set(1);
    assert_eq!(b.get(), 1);

    drop(b);
    a.set(2);
    // No panic, no leak: the dropped binding's subscription is gone.
    assert_eq!(env.hub().subscriber_count(), 1);
}
