//! Resolution is read-only against the registry and safe to run from many
//! threads once the bind phase is over.

use nominal_di::{constructor, implements, singleton, Injector};
use std::sync::Arc;
use std::thread;

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

#[test]
fn test_concurrent_resolution_after_binding() {
    let mut di = Injector::new();
    di.bind("a1", [singleton(A { v: 1 }), implements::<A, dyn Hello>(|a| a)])
        .unwrap();
    di.bind("a2", [
        constructor::<A, _>(|| Ok(Arc::new(A { v: 2 }))),
        implements::<A, dyn Hello>(|a| a),
    ])
    .unwrap();

    let baseline: Arc<A> = di.resolve("a1").unwrap();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    let shared: Arc<A> = di.resolve("a1").unwrap();
                    assert!(Arc::ptr_eq(&shared, &baseline));

                    let fresh: Arc<A> = di.resolve("a2").unwrap();
                    assert_eq!(fresh.v, 2);

                    let greeters: Vec<Arc<dyn Hello>> = di.resolve_all().unwrap();
                    assert_eq!(greeters.len(), 2);
                }
            });
        }
    });
}

#[test]
fn test_container_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Injector>();
}
