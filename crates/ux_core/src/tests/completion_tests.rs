use super::*;

#[tokio::test]
async fn resolve_once_fulfils_and_unsubscribes() {
    let (reply, done) = oneshot::channel();
    let mut handlers = CompletionHandlers::default();
    handlers.register(resolve_once::<u32>(reply));

    handlers.dispatch(&7);
    handlers.dispatch(&8);

    assert!(handlers.is_empty());
    assert_eq!(done.await.expect("reply").expect("value"), 7);
}

#[tokio::test]
async fn collect_then_resolve_waits_for_expected_count() {
    let (reply, mut done) = oneshot::channel();
    let mut handlers = CompletionHandlers::default();
    handlers.register(collect_then_resolve::<&'static str>(3, reply));

    handlers.dispatch(&"a");
    handlers.dispatch(&"b");
    assert_eq!(handlers.len(), 1);
    assert!(done.try_recv().is_err());

    handlers.dispatch(&"c");
    assert!(handlers.is_empty());
    assert_eq!(done.await.expect("reply").expect("values"), vec!["a", "b", "c"]);
}

#[test]
fn dispatch_keeps_pending_handlers_only() {
    let mut handlers = CompletionHandlers::<u8>::default();
    let mut remaining = 2;
    handlers.register(move |_| {
        remaining -= 1;
        if remaining == 0 {
            Handled::Done
        } else {
            Handled::Pending
        }
    });
    handlers.register(|_| Handled::Done);

    handlers.dispatch(&1);
    assert_eq!(handlers.len(), 1);
    handlers.dispatch(&1);
    assert!(handlers.is_empty());
}

#[test]
fn dropped_awaiter_does_not_break_dispatch() {
    let (reply, done) = oneshot::channel();
    drop(done);
    let mut handlers = CompletionHandlers::default();
    handlers.register(resolve_once::<u32>(reply));

    handlers.dispatch(&1);
    assert!(handlers.is_empty());
}
