/// Referential integrity holds under arbitrary command sequences
mod common;

use common::*;
use estatebook_core::rules::invariants::check_referential_integrity;
use estatebook_core::{AutoConfirm, AutoDecline, Command, ConfirmationGate, EstateError, Store};
use proptest::prelude::*;

const CLIENTS: [&str; 6] = [
    "Alice Pauline",
    "Benson Meier",
    "Carl Kurz",
    "Daniel Meier",
    "Tan Wen Xuan",
    "Nobody",
];
const LISTINGS: [&str; 4] = ["Pasir Ris Flat", "Bishan Condo", "Tampines Terrace", "Nowhere"];

#[derive(Debug, Clone)]
enum Step {
    DeleteClient { who: usize, confirm: bool, skip: bool },
    DeleteListing { which: usize },
    AddBuyer { which: usize, who: usize },
    RemoveBuyer { which: usize, who: usize },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..CLIENTS.len(), any::<bool>(), any::<bool>())
            .prop_map(|(who, confirm, skip)| Step::DeleteClient { who, confirm, skip }),
        (0..LISTINGS.len()).prop_map(|which| Step::DeleteListing { which }),
        (0..LISTINGS.len(), 0..CLIENTS.len()).prop_map(|(which, who)| Step::AddBuyer { which, who }),
        (0..LISTINGS.len(), 0..CLIENTS.len())
            .prop_map(|(which, who)| Step::RemoveBuyer { which, who }),
    ]
}

fn seeded() -> Store {
    let mut store = typical_store();
    run(&mut store, Command::AddBuyer(tan()), &AutoConfirm).unwrap();
    store
}

fn to_command(step: &Step) -> (Command, bool) {
    match *step {
        Step::DeleteClient { who, confirm, skip } => (
            Command::DeleteClient {
                name: CLIENTS[who].to_string(),
                skip_confirmation: skip,
            },
            confirm,
        ),
        Step::DeleteListing { which } => (
            Command::DeleteListing {
                name: LISTINGS[which].to_string(),
            },
            true,
        ),
        Step::AddBuyer { which, who } => (
            Command::AddBuyersToListing {
                listing: LISTINGS[which].to_string(),
                buyers: vec![CLIENTS[who].to_string()],
            },
            true,
        ),
        Step::RemoveBuyer { which, who } => (
            Command::RemoveBuyersFromListing {
                listing: LISTINGS[which].to_string(),
                buyers: vec![CLIENTS[who].to_string()],
            },
            true,
        ),
    }
}

proptest! {
    #[test]
    fn prop_references_always_resolve(steps in prop::collection::vec(step(), 1..20)) {
        let mut store = seeded();

        for s in &steps {
            let (cmd, confirm) = to_command(s);
            let gate: &dyn ConfirmationGate = if confirm { &AutoConfirm } else { &AutoDecline };
            let before = store.snapshot_digest().unwrap();

            let result = run(&mut store, cmd, gate);

            if result.is_err() {
                prop_assert_eq!(store.snapshot_digest().unwrap(), before);
            }
            prop_assert!(check_referential_integrity(&store).is_empty());
        }
    }

    #[test]
    fn prop_deleted_buyer_leaves_listing_count(confirm_order in prop::collection::vec(any::<bool>(), 2)) {
        // Buyers never take listings with them
        let mut store = seeded();
        let count = store.listings().len();

        for (who, confirm) in ["Alice Pauline", "Benson Meier"].iter().zip(confirm_order) {
            let gate: &dyn ConfirmationGate = if confirm { &AutoConfirm } else { &AutoDecline };
            let result = run(
                &mut store,
                Command::DeleteClient { name: who.to_string(), skip_confirmation: false },
                gate,
            );
            if !confirm {
                prop_assert!(matches!(result, Err(EstateError::Aborted { .. })), "expected Err(EstateError::Aborted {{ .. }})");
            }
        }

        prop_assert_eq!(store.listings().len(), count);
    }
}
