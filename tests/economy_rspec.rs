//! Behavioural test: buying from the blacksmith.
//!
//! A fresh session starts with 60 coins. Buying the sword leaves 10 coins
//! and a weapon; the armor is then refused for lack of funds without
//! touching the purse.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/shared_session.rs"]
mod shared_session;

use rspec_runner::run_serial;
use shared_session::SharedSession;
use test_utils::fixtures::small_config;
use test_utils::sim::{stand_by_vendor, STEP};
use wildlands::economy::{Equipment, ItemKind, Notification, Receipt};
use wildlands::input::InputIntent;
use wildlands::simulation::SimEvent;

fn open_shop(session: &mut SharedSession) {
    session.reset(small_config(), 11);
    session.with(stand_by_vendor);
    let report = session.with(|sim| sim.step(&InputIntent::interact(), STEP));
    session.record(report);
}

fn buy(session: &SharedSession, item: ItemKind) {
    let report = session.with(|sim| {
        sim.request_purchase(item);
        sim.step(&InputIntent::default(), STEP)
    });
    session.record(report);
}

fn purchase_notifications(session: &SharedSession) -> Vec<Notification> {
    session
        .events()
        .into_iter()
        .filter_map(|event| match event {
            SimEvent::Purchase(notification) => Some(notification),
            _ => None,
        })
        .collect()
}

#[test]
fn buying_from_the_blacksmith() {
    run_serial(&rspec::given(
        "a new player standing at the blacksmith",
        SharedSession::default(),
        |scenario| {
            scenario.before_each(open_shop);

            scenario.then("the dialogue opens with 60 coins in the purse", |session| {
                assert!(session.events().contains(&SimEvent::DialogueOpened));
                session.with(|sim| {
                    assert!(sim.vendor().dialogue_open);
                    assert_eq!(sim.player().purse.coins(), 60);
                });
            });

            scenario.when("the sword is bought", |ctx| {
                ctx.before_each(|session| buy(session, ItemKind::Sword));

                ctx.then("the purse holds 10 coins and a weapon", |session| {
                    session.with(|sim| {
                        assert_eq!(sim.player().purse.coins(), 10);
                        assert!(sim.player().purse.owns(Equipment::Weapon));
                        assert!(!sim.player().purse.owns(Equipment::Armor));
                    });
                });

                ctx.then("a receipt is issued", |session| {
                    assert_eq!(
                        purchase_notifications(session),
                        vec![Notification::Purchased(Receipt {
                            item: ItemKind::Sword,
                            cost: 50,
                            remaining: 10,
                        })]
                    );
                });

                ctx.when("the armor is requested next", |next| {
                    next.before_each(|session| buy(session, ItemKind::Armor));

                    next.then("it is refused for insufficient funds", |session| {
                        let last = purchase_notifications(session)
                            .pop()
                            .expect("armor notification");
                        assert_eq!(
                            last,
                            Notification::InsufficientFunds {
                                item: ItemKind::Armor,
                                cost: 80,
                                available: 10,
                            }
                        );
                        assert_eq!(last.to_string(), "insufficient funds");
                    });

                    next.then("the purse is untouched", |session| {
                        session.with(|sim| {
                            assert_eq!(sim.player().purse.coins(), 10);
                            assert!(!sim.player().purse.owns(Equipment::Armor));
                        });
                    });
                });

                ctx.when("the sword is requested again", |next| {
                    next.before_each(|session| buy(session, ItemKind::Sword));

                    next.then("it is refused as already owned", |session| {
                        let last = purchase_notifications(session).pop();
                        assert_eq!(last, Some(Notification::AlreadyOwned(ItemKind::Sword)));
                        session.with(|sim| assert_eq!(sim.player().purse.coins(), 10));
                    });
                });
            });

            scenario.when("the dialogue is dismissed before buying", |ctx| {
                ctx.before_each(|session| {
                    let dismiss = InputIntent {
                        dismiss: true,
                        ..InputIntent::default()
                    };
                    let report = session.with(|sim| sim.step(&dismiss, STEP));
                    session.record(report);
                    buy(session, ItemKind::Sword);
                });

                ctx.then("the shop is unavailable and nothing is charged", |session| {
                    let last = purchase_notifications(session).pop();
                    assert_eq!(last, Some(Notification::VendorUnavailable));
                    session.with(|sim| {
                        assert_eq!(sim.player().purse.coins(), 60);
                        assert!(!sim.player().purse.owns(Equipment::Weapon));
                    });
                });
            });
        },
    ));
}
