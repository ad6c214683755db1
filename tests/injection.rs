use nominal_di::{implements, injectable, singleton, DiError, Injector};
use std::sync::Arc;

trait Hello: Send + Sync {
    fn hello(&self) -> String;
}

struct A {
    v: i32,
}

impl Hello for A {
    fn hello(&self) -> String {
        format!("hello {}", self.v)
    }
}

struct B {
    tag: &'static str,
}

fn container() -> Injector {
    let mut di = Injector::new();
    di.bind("a1", [singleton(A { v: 1 }), implements::<A, dyn Hello>(|a| a)])
        .unwrap();
    di.bind("a2", [singleton(A { v: 2 })]).unwrap();
    di.bind("b1", [singleton(B { tag: "station" })]).unwrap();
    di
}

#[test]
fn test_inject_trait_and_concrete_fields() {
    #[derive(Default)]
    struct App {
        greeter: Option<Arc<dyn Hello>>,
        station: Option<Arc<B>>,
    }

    injectable! {
        App {
            greeter: inject:"a1",
            station: inject:"b1",
        }
    }

    let di = container();
    let mut app = App::default();
    di.inject(&mut app).unwrap();

    assert_eq!(app.greeter.unwrap().hello(), "hello 1");
    assert_eq!(app.station.unwrap().tag, "station");
}

#[test]
fn test_injected_fields_match_direct_resolution() {
    #[derive(Default)]
    struct App {
        first: Option<Arc<A>>,
        second: Option<Arc<A>>,
    }

    injectable! {
        App {
            first: inject:"a1",
            second: inject:"a2",
        }
    }

    let di = container();
    let mut app = App::default();
    di.inject(&mut app).unwrap();

    let direct_first: Arc<A> = di.resolve("a1").unwrap();
    let direct_second: Arc<A> = di.resolve("a2").unwrap();

    let first = app.first.unwrap();
    let second = app.second.unwrap();
    assert!(Arc::ptr_eq(&first, &direct_first));
    assert!(Arc::ptr_eq(&second, &direct_second));
    assert!(!Arc::ptr_eq(&first, &second)); // Each field from its own binding
}

#[test]
fn test_inject_overwrites_plain_handle_fields() {
    struct App {
        greeter: Arc<dyn Hello>,
        station: Arc<B>,
    }

    injectable! {
        App {
            greeter: inject:"a1",
            station: inject:"b1",
        }
    }

    let di = container();
    let mut app = App {
        greeter: Arc::new(A { v: 0 }),
        station: Arc::new(B { tag: "placeholder" }),
    };
    di.inject(&mut app).unwrap();

    assert_eq!(app.greeter.hello(), "hello 1");
    assert_eq!(app.station.tag, "station");
}

#[test]
fn test_missing_binding_keeps_earlier_assignments() {
    #[derive(Default)]
    struct App {
        present: Option<Arc<A>>,
        absent: Option<Arc<B>>,
    }

    injectable! {
        App {
            present: inject:"a1",
            absent: inject:"nowhere",
        }
    }

    let di = container();
    let mut app = App::default();

    match di.inject(&mut app) {
        Err(DiError::NotFound(name)) => assert_eq!(name, "nowhere"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    // No rollback: the field resolved before the failure stays assigned.
    assert!(app.present.is_some());
    assert!(app.absent.is_none());
}

#[test]
fn test_undeclared_trait_field_is_mismatch() {
    #[derive(Default)]
    struct App {
        // "a2" never declared the Hello trait.
        greeter: Option<Arc<dyn Hello>>,
    }

    injectable! {
        App {
            greeter: inject:"a2",
        }
    }

    let di = container();
    let mut app = App::default();
    assert!(matches!(
        di.inject(&mut app),
        Err(DiError::TypeMismatch { .. })
    ));
    assert!(app.greeter.is_none());
}
