use super::*;
use crate::foundation::value::args;
use std::sync::atomic::{AtomicBool, Ordering};

fn recorder() -> (Arc<Mutex<Vec<Props>>>, impl Fn(&Props) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |p: &Props| sink.lock().unwrap().push(p.clone()))
}

#[test]
fn subscribers_get_current_value_then_pushes() {
    let ch = PropChannel::new(args([("label", "a")]));
    let (seen, obs) = recorder();
    let _sub = ch.subscribe(obs);
    ch.next(args([("label", "b")]));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0]["label"].as_str(), Some("a"));
    assert_eq!(seen[1]["label"].as_str(), Some("b"));
}

#[test]
fn pushes_are_multicast() {
    let ch = PropChannel::new(Props::new());
    let (a, obs_a) = recorder();
    let (b, obs_b) = recorder();
    let _sa = ch.subscribe(obs_a);
    let _sb = ch.subscribe(obs_b);
    ch.next(args([("n", 1i64)]));
    assert_eq!(a.lock().unwrap().len(), 2);
    assert_eq!(b.lock().unwrap().len(), 2);
    assert_eq!(ch.subscriber_count(), 2);
}

#[test]
fn completion_stops_delivery_and_is_idempotent() {
    struct Obs {
        completed: AtomicBool,
        hits: Mutex<usize>,
    }
    impl PropObserver for Obs {
        fn next(&self, _: &Props) {
            *self.hits.lock().unwrap() += 1;
        }
        fn complete(&self) {
            self.completed.store(true, Ordering::SeqCst);
        }
    }

    let ch = PropChannel::new(Props::new());
    let obs = Arc::new(Obs {
        completed: AtomicBool::new(false),
        hits: Mutex::new(0),
    });
    let obs_for_sub = obs.clone();
    let sub = ch.subscribe(move |p: &Props| obs_for_sub.next(p));
    let _completion = ch.subscribe(ObsHandle(obs.clone()));

    ch.complete();
    ch.complete();
    ch.next(args([("late", true)]));

    assert!(ch.is_closed());
    assert!(obs.completed.load(Ordering::SeqCst));
    // One replay per subscription, nothing after completion.
    assert_eq!(*obs.hits.lock().unwrap(), 2);
    assert!(!sub.is_active());
    assert_eq!(ch.subscriber_count(), 0);

    struct ObsHandle(Arc<Obs>);
    impl PropObserver for ObsHandle {
        fn next(&self, p: &Props) {
            self.0.next(p);
        }
        fn complete(&self) {
            self.0.complete();
        }
    }
}

#[test]
fn late_subscriber_only_sees_completion() {
    let ch = PropChannel::new(args([("label", "a")]));
    ch.complete();
    let (seen, obs) = recorder();
    let sub = ch.subscribe(obs);
    assert!(seen.lock().unwrap().is_empty());
    assert!(!sub.is_active());
}

#[test]
fn dropping_subscription_detaches() {
    let ch = PropChannel::new(Props::new());
    let (seen, obs) = recorder();
    let sub = ch.subscribe(obs);
    assert!(sub.is_active());
    sub.unsubscribe();
    ch.next(args([("x", 1i64)]));
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(ch.subscriber_count(), 0);
}

#[test]
fn clones_share_the_stream() {
    let ch = PropChannel::new(Props::new());
    let other = ch.clone();
    other.next(args([("label", "b")]));
    assert!(ch.same_channel(&other));
    assert_eq!(ch.current()["label"].as_str(), Some("b"));
    assert!(!ch.same_channel(&PropChannel::new(Props::new())));
}
