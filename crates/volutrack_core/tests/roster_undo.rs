use proptest::prelude::*;
use volutrack_core::{counts, Guest, Roster, RosterError, UndoError, UndoLog};

fn roster_of(entries: &[(&str, bool)]) -> Roster {
    Roster::new(
        entries
            .iter()
            .map(|(name, confirmed)| Guest::new(name).confirmed(*confirmed))
            .collect(),
    )
}

#[test]
fn add_appends_unconfirmed_guest_at_the_end() {
    let roster = roster_of(&[("Treasure", false), ("Nic", true)]);

    let updated = roster.add("John Doe");
    assert_eq!(updated.len(), 3);
    let last = &updated.guests()[2];
    assert_eq!(last.name, "John Doe");
    assert!(!last.is_confirmed);
    assert_eq!(roster.len(), 2);
}

#[test]
fn remove_then_undo_restores_original_roster() {
    let roster = roster_of(&[("Treasure", false), ("Nic", true)]);
    let mut log = UndoLog::default();

    let (after_remove, removed) = roster.remove(0).unwrap();
    assert_eq!(removed.name, "Treasure");
    assert!(!removed.is_confirmed);
    log.record_removal(removed, 0);

    let entry = log.pop_last().unwrap();
    assert_eq!(entry.original_index, 0);
    let restored = after_remove.insert_at(entry.original_index, entry.guest);

    assert_eq!(restored, roster);
    assert_eq!(log.pop_last(), Err(UndoError::NothingToUndo));
}

#[test]
fn undo_clamps_when_roster_shrank() {
    let roster = roster_of(&[("Ann", false), ("Bob", false), ("Cat", true)]);
    let mut log = UndoLog::default();

    let (roster, cat) = roster.remove(2).unwrap();
    log.record_removal(cat, 2);
    let (roster, _) = roster.remove(1).unwrap();
    let (roster, _) = roster.remove(0).unwrap();

    let entry = log.pop_last().unwrap();
    let restored = roster.insert_at(entry.original_index, entry.guest);
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.guests()[0].name, "Cat");
}

#[test]
fn stale_index_fails_without_changing_roster() {
    let roster = roster_of(&[("Ann", false)]);

    assert_eq!(
        roster.toggle_confirmation(5).unwrap_err(),
        RosterError::IndexOutOfRange { index: 5, len: 1 }
    );
    assert!(!roster.guests()[0].is_confirmed);
}

#[test]
fn replace_updates_detail_fields() {
    let roster = roster_of(&[("Ann", false)]);
    let mut edited = roster.guests()[0].clone();
    edited.details.email = "ann@example.org".to_string();
    edited.details.notes = "brings snacks".to_string();

    let updated = roster.replace(0, edited.clone()).unwrap();
    assert_eq!(updated.guests()[0], edited);
}

#[test]
fn counts_scenario() {
    let roster = roster_of(&[("A", true), ("B", false), ("C", true)]);
    let summary = counts(roster.guests());

    assert_eq!(summary.total, 3);
    assert_eq!(summary.attending, 2);
    assert_eq!(summary.unconfirmed, 1);
}

proptest! {
    #[test]
    fn remove_then_insert_at_is_identity(
        entries in proptest::collection::vec(("[a-z]{2,8}", any::<bool>()), 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let roster = Roster::new(
            entries
                .iter()
                .map(|(name, confirmed)| Guest::new(name).confirmed(*confirmed))
                .collect(),
        );
        let index = pick.index(roster.len());

        let (shrunk, guest) = roster.remove(index).unwrap();
        prop_assert_eq!(shrunk.insert_at(index, guest), roster);
    }
}
