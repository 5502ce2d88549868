//! Property-based tests for the route gate.

use proptest::prelude::*;

use super::gate::{GateDecision, GateState, RouteGate, decide};
use super::navigator::MockNavigator;
use super::table::{RouteClass, RouteTable};
use crate::session::AuthState;

fn arb_path() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("/"),
        Just("/dashboard"),
        Just("/wallets"),
        Just("/virtual-cards"),
        Just("/fx"),
        Just("/login"),
        Just("/signup"),
        Just("/pricing"),
    ]
}

fn arb_auth() -> impl Strategy<Value = AuthState> {
    prop_oneof![
        Just(AuthState::Loading),
        Just(AuthState::Authenticated),
        Just(AuthState::Unauthenticated),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// While the first resolution is pending nothing is decided.
    #[test]
    fn prop_loading_never_redirects(path in arb_path()) {
        let mut navigator = MockNavigator::new();
        navigator.expect_replace().never();
        navigator.expect_reload().never();

        let mut gate = RouteGate::new(RouteTable::default());
        prop_assert_eq!(gate.check(path, AuthState::Loading, &navigator), &GateState::Resolving);
        prop_assert!(!gate.can_render());
    }

    /// A protected view only ever renders for an authenticated session.
    #[test]
    fn prop_protected_never_flashes(path in arb_path(), auth in arb_auth()) {
        let table = RouteTable::default();
        let mut navigator = MockNavigator::new();
        navigator.expect_replace().return_const(());

        let mut gate = RouteGate::new(table.clone());
        gate.check(path, auth, &navigator);

        if gate.can_render() && table.classify(path) == RouteClass::Protected {
            prop_assert_eq!(auth, AuthState::Authenticated);
        }
    }

    /// Each redirect decision issues exactly one navigator call; renders issue none.
    #[test]
    fn prop_one_side_effect_per_redirect(path in arb_path(), auth in arb_auth()) {
        let decision = decide(&RouteTable::default(), path, auth);
        let mut navigator = MockNavigator::new();
        match &decision {
            GateDecision::Redirect(to) => {
                let to = to.clone();
                navigator
                    .expect_replace()
                    .withf(move |p| p == to)
                    .times(1)
                    .return_const(());
            }
            GateDecision::Wait | GateDecision::Render => {
                navigator.expect_replace().never();
            }
        }

        let mut gate = RouteGate::new(RouteTable::default());
        gate.check(path, auth, &navigator);
        prop_assert_eq!(gate.can_render(), decision == GateDecision::Render);
    }
}
