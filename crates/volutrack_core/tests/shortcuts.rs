use volutrack_core::{default_shortcuts, KeyEvent, ShortcutAction, ShortcutTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
    Save,
    SaveAll,
    Fallback,
}

#[test]
fn ctrl_binding_rejects_extra_shift() {
    let table = ShortcutTable::new().bind("ctrl+s", Demo::Save).unwrap();

    assert_eq!(table.dispatch(&KeyEvent::key("s").with_ctrl()), Some(Demo::Save));
    assert_eq!(table.dispatch(&KeyEvent::key("S").with_ctrl().with_shift()), None);
    assert_eq!(table.dispatch(&KeyEvent::key("s")), None);
    assert_eq!(table.dispatch(&KeyEvent::key("s").with_ctrl().with_alt()), None);
}

#[test]
fn declared_shift_matches_only_with_shift() {
    let table = ShortcutTable::new()
        .bind("ctrl+s", Demo::Save)
        .unwrap()
        .bind("ctrl+shift+s", Demo::SaveAll)
        .unwrap();

    assert_eq!(
        table.dispatch(&KeyEvent::key("S").with_ctrl().with_shift()),
        Some(Demo::SaveAll)
    );
    assert_eq!(table.dispatch(&KeyEvent::key("s").with_meta()), Some(Demo::Save));
}

#[test]
fn first_matching_entry_wins() {
    let table = ShortcutTable::new()
        .bind("ctrl+k", Demo::Save)
        .unwrap()
        .bind("cmd+k", Demo::Fallback)
        .unwrap();

    assert_eq!(table.dispatch(&KeyEvent::key("k").with_ctrl()), Some(Demo::Save));
}

#[test]
fn default_table_maps_guest_list_actions() {
    let table = default_shortcuts();

    let cases = [
        (KeyEvent::key("n").with_ctrl(), ShortcutAction::FocusNameInput),
        (KeyEvent::key("f").with_ctrl(), ShortcutAction::FocusSearch),
        (KeyEvent::key("e").with_ctrl(), ShortcutAction::ExportCsv),
        (KeyEvent::key("p").with_meta(), ShortcutAction::Print),
        (KeyEvent::key("d").with_ctrl(), ShortcutAction::ToggleDarkMode),
        (KeyEvent::key("z").with_ctrl(), ShortcutAction::UndoRemoval),
        (KeyEvent::key("?"), ShortcutAction::ToggleHelp),
        (KeyEvent::key("?").with_shift(), ShortcutAction::ToggleHelp),
        (KeyEvent::key("Escape"), ShortcutAction::CloseHelp),
    ];
    for (event, expected) in cases {
        assert_eq!(table.dispatch(&event), Some(expected), "event {event:?}");
    }

    assert_eq!(table.dispatch(&KeyEvent::key("z")), None);
    assert_eq!(table.dispatch(&KeyEvent::key("?").with_ctrl()), None);
    assert_eq!(table.dispatch(&KeyEvent::key("z").with_ctrl().with_shift()), None);
}
