use bucketry::lifecycle::ReloadGate;

#[test]
fn test_first_request_issues_fetch() {
    let mut gate = ReloadGate::new();
    assert!(!gate.is_loading());

    assert!(gate.request(false));
    assert!(gate.is_loading());
    assert_eq!(gate.issued(), 1);

    assert!(!gate.settle());
    assert!(!gate.is_loading());
    assert_eq!(gate.cycles(), 1);
}

#[test]
fn test_requests_while_in_flight_are_absorbed() {
    let mut gate = ReloadGate::new();
    assert!(gate.request(false));
    assert!(!gate.request(false));
    assert!(!gate.request(false));
    assert!(!gate.has_follow_up());

    assert!(!gate.settle());
    assert_eq!(gate.issued(), 1);
    assert_eq!(gate.cycles(), 1);
}

#[test]
fn test_mutation_reload_queues_one_follow_up() {
    let mut gate = ReloadGate::new();
    assert!(gate.request(false));
    assert!(!gate.request(true));
    assert!(!gate.request(true));
    assert!(gate.has_follow_up());

    // First fetch settles, the follow-up starts and loading stays on
    assert!(gate.settle());
    assert!(gate.is_loading());
    assert_eq!(gate.issued(), 2);

    assert!(!gate.settle());
    assert!(!gate.is_loading());
    assert_eq!(gate.cycles(), 1);
}

#[test]
fn test_settle_without_fetch_is_ignored() {
    let mut gate = ReloadGate::new();
    assert!(!gate.settle());
    assert_eq!(gate.cycles(), 0);
    assert_eq!(gate, ReloadGate::default());
}
