use super::*;

#[test]
fn tickets_increase() {
    let first = RequestTicket::default();
    let second = first.next();
    assert!(second > first);
    assert_ne!(second.next(), second);
}

#[test]
fn only_pending_is_pending() {
    assert!(Lifecycle::<()>::Pending.is_pending());
    assert!(!Lifecycle::Fulfilled(()).is_pending());
    assert!(!Lifecycle::<()>::Rejected("x".to_owned()).is_pending());
}
