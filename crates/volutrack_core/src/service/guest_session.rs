//! Guest list session service.
//!
//! # Responsibility
//! - Hold the roster, undo log, view state and preferences for one session.
//! - Validate additions and renames before mutating.
//! - Persist every committed mutation through the injected gateway.
//!
//! # Invariants
//! - The roster is replaced wholesale on each mutation (copy-on-write).
//! - Failed operations leave roster, undo log and edit target unchanged.
//! - Persistence failures never fail a mutation; they surface as a warning
//!   on the returned outcome.
//! - Guest names never reach the logs.

use crate::config::SessionConfig;
use crate::export::report::{export_csv, print_report, ExportError};
use crate::model::guest::Guest;
use crate::model::validation::{validate_guest_name, validate_guest_rename, GuestValidationError};
use crate::query::view::{counts, view, GuestView, RosterCounts, SortMode, ViewQuery};
use crate::repo::gateway::PersistenceGateway;
use crate::repo::roster_repo::{
    load_dark_mode, load_roster, save_dark_mode, save_roster, RosterSource,
};
use crate::roster::undo::{UndoError, UndoLog};
use crate::roster::{Roster, RosterError};
use crate::shortcut::dispatcher::{default_shortcuts, KeyEvent, ShortcutAction, ShortcutTable};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Service error for guest list use-cases.
#[derive(Debug)]
pub enum SessionError {
    /// Name rejected; shown to the user as-is.
    Validation(GuestValidationError),
    /// Stale index from the caller; the session is unchanged.
    Roster(RosterError),
    /// Undo requested with an empty log.
    Undo(UndoError),
    /// `commit_edit` called without `begin_edit`.
    NoEditInProgress,
    Export(ExportError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Roster(err) => write!(f, "{err}"),
            Self::Undo(err) => write!(f, "{err}"),
            Self::NoEditInProgress => write!(f, "no guest is being edited"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Roster(err) => Some(err),
            Self::Undo(err) => Some(err),
            Self::NoEditInProgress => None,
            Self::Export(err) => Some(err),
        }
    }
}

impl From<GuestValidationError> for SessionError {
    fn from(value: GuestValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RosterError> for SessionError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<UndoError> for SessionError {
    fn from(value: UndoError) -> Self {
        Self::Undo(value)
    }
}

impl From<ExportError> for SessionError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Result of a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Roster position affected, when the mutation targets one guest.
    pub index: Option<usize>,
    /// Whether the gateway accepted the save.
    pub persisted: bool,
    /// Non-blocking warning for the UI (e.g. a toast) when saving failed.
    pub warning: Option<String>,
}

/// Ephemeral display state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: ViewQuery,
    /// Roster index of the guest being edited inline.
    pub editing: Option<usize>,
}

/// Session-side effect of a handled key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEffect {
    /// Action belongs to the presentation layer (focus, download, print).
    Presentation,
    Undone(MutationOutcome),
    NothingToUndo,
    /// The restore would duplicate a current name; the undo stays pending.
    UndoRejected(GuestValidationError),
    DarkMode { enabled: bool, outcome: MutationOutcome },
    HelpVisible(bool),
}

/// Handled key event: the matched action and what the session did about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDispatch {
    pub action: ShortcutAction,
    pub effect: KeyEffect,
}

/// One guest list session over an injected persistence gateway.
pub struct GuestSession<G: PersistenceGateway> {
    gateway: G,
    config: SessionConfig,
    roster: Roster,
    undo: UndoLog,
    view: ViewState,
    dark_mode: bool,
    help_visible: bool,
    shortcuts: ShortcutTable<ShortcutAction>,
}

impl<G: PersistenceGateway> GuestSession<G> {
    /// Opens a session, loading the stored roster (or the seed) and the
    /// dark-mode preference.
    pub fn open(gateway: G, config: SessionConfig) -> Self {
        let (roster, source) = load_roster(&gateway, &config.storage_key, config.seed_on_empty);
        let dark_mode = load_dark_mode(&gateway, &config.dark_mode_key).unwrap_or(false);
        info!(
            "event=session_open module=session status=ok source={} total={} dark_mode={}",
            source_label(source),
            roster.len(),
            dark_mode
        );

        Self {
            undo: UndoLog::with_capacity(config.undo_capacity),
            gateway,
            config,
            roster,
            view: ViewState::default(),
            dark_mode,
            help_visible: false,
            shortcuts: default_shortcuts(),
        }
    }

    /// Opens a session with default configuration.
    pub fn open_default(gateway: G) -> Self {
        Self::open(gateway, SessionConfig::default())
    }

    /// Replaces the shortcut table, e.g. for host-specific bindings.
    pub fn with_shortcuts(mut self, shortcuts: ShortcutTable<ShortcutAction>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Validates and appends a new unconfirmed guest.
    pub fn add_guest(&mut self, name: &str) -> SessionResult<MutationOutcome> {
        let name = validate_guest_name(name, self.roster.guests()).map_err(|err| {
            debug!("event=guest_add module=session status=rejected reason={err:?}");
            err
        })?;

        self.roster = self.roster.add(&name);
        let index = self.roster.len() - 1;
        info!(
            "event=guest_add module=session status=ok index={} total={}",
            index,
            self.roster.len()
        );
        Ok(self.persist_roster(Some(index)))
    }

    /// Removes a guest and records it for undo.
    pub fn remove_guest(&mut self, index: usize) -> SessionResult<MutationOutcome> {
        let (roster, removed) = self
            .roster
            .remove(index)
            .map_err(|err| stale_index("guest_remove", err))?;

        self.roster = roster;
        if self.undo.record_removal(removed, index).is_some() {
            debug!("event=undo_evict module=session status=ok capacity={}", self.undo.capacity());
        }
        self.view.editing = match self.view.editing {
            Some(editing) if editing == index => None,
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };

        info!(
            "event=guest_remove module=session status=ok index={} total={} undo_depth={}",
            index,
            self.roster.len(),
            self.undo.len()
        );
        Ok(self.persist_roster(Some(index)))
    }

    /// Restores the most recent removal at its original position, clamped
    /// to the current roster length.
    ///
    /// Fails with `Duplicate` when a guest with the same name was added
    /// since the removal; the entry stays on the log so the undo can be
    /// retried after the conflicting guest is renamed or removed.
    pub fn undo_last_removal(&mut self) -> SessionResult<MutationOutcome> {
        let Some(pending) = self.undo.peek_last() else {
            debug!("event=guest_undo module=session status=empty");
            return Err(UndoError::NothingToUndo.into());
        };
        let key = pending.guest.name_key();
        if self.roster.iter().any(|guest| guest.name_key() == key) {
            debug!(
                "event=guest_undo module=session status=rejected reason=Duplicate undo_depth={}",
                self.undo.len()
            );
            return Err(GuestValidationError::Duplicate.into());
        }
        let entry = self.undo.pop_last()?;

        let position = entry.original_index.min(self.roster.len());
        self.roster = self.roster.insert_at(position, entry.guest);
        if let Some(editing) = self.view.editing {
            if editing >= position {
                self.view.editing = Some(editing + 1);
            }
        }

        info!(
            "event=guest_undo module=session status=ok index={} requested_index={} total={}",
            position,
            entry.original_index,
            self.roster.len()
        );
        Ok(self.persist_roster(Some(position)))
    }

    pub fn toggle_confirmation(&mut self, index: usize) -> SessionResult<MutationOutcome> {
        self.roster = self
            .roster
            .toggle_confirmation(index)
            .map_err(|err| stale_index("guest_toggle", err))?;
        info!(
            "event=guest_toggle module=session status=ok index={} confirmed={}",
            index, self.roster.guests()[index].is_confirmed
        );
        Ok(self.persist_roster(Some(index)))
    }

    /// Renames one guest. Runs the validator unless disabled in config.
    pub fn rename_guest(&mut self, index: usize, name: &str) -> SessionResult<MutationOutcome> {
        self.check_index("guest_rename", index)?;
        let name = self.checked_rename(index, name)?;

        self.roster = self
            .roster
            .update_name(index, &name)
            .map_err(|err| stale_index("guest_rename", err))?;
        info!("event=guest_rename module=session status=ok index={index}");
        Ok(self.persist_roster(Some(index)))
    }

    /// Replaces a whole record (name, status, details). The stored id is
    /// kept so the guest keeps its identity.
    pub fn update_guest(&mut self, index: usize, guest: Guest) -> SessionResult<MutationOutcome> {
        let current_id = match self.roster.get(index) {
            Some(current) => current.id,
            None => {
                return Err(stale_index(
                    "guest_update",
                    RosterError::IndexOutOfRange {
                        index,
                        len: self.roster.len(),
                    },
                ))
            }
        };
        let name = self.checked_rename(index, &guest.name)?;

        let updated = Guest {
            id: current_id,
            name,
            ..guest
        };
        self.roster = self
            .roster
            .replace(index, updated)
            .map_err(|err| stale_index("guest_update", err))?;
        info!("event=guest_update module=session status=ok index={index}");
        Ok(self.persist_roster(Some(index)))
    }

    /// Marks a guest as being edited inline.
    pub fn begin_edit(&mut self, index: usize) -> SessionResult<()> {
        self.check_index("edit_begin", index)?;
        self.view.editing = Some(index);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.view.editing = None;
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.view.editing
    }

    /// Applies the inline edit. On validation failure the edit stays open so
    /// the user can correct the name.
    pub fn commit_edit(&mut self, name: &str) -> SessionResult<MutationOutcome> {
        let index = self.view.editing.ok_or(SessionError::NoEditInProgress)?;
        let outcome = self.rename_guest(index, name)?;
        self.view.editing = None;
        Ok(outcome)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.query.search = search.into();
    }

    pub fn set_sort(&mut self, sort_by: SortMode) {
        self.view.query.sort_by = sort_by;
    }

    pub fn set_hide_unconfirmed(&mut self, hide: bool) {
        self.view.query.hide_unconfirmed = hide;
    }

    pub fn toggle_hide_unconfirmed(&mut self) -> bool {
        self.view.query.hide_unconfirmed = !self.view.query.hide_unconfirmed;
        self.view.query.hide_unconfirmed
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Filtered, sorted rows for display under the current view state.
    pub fn visible_guests(&self) -> Vec<GuestView<'_>> {
        view(self.roster.guests(), &self.view.query)
    }

    /// Counts over the full roster, ignoring filters.
    pub fn counts(&self) -> RosterCounts {
        counts(self.roster.guests())
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flips and persists the dark-mode preference.
    pub fn toggle_dark_mode(&mut self) -> (bool, MutationOutcome) {
        self.dark_mode = !self.dark_mode;
        let outcome = match save_dark_mode(&self.gateway, &self.config.dark_mode_key, self.dark_mode)
        {
            Ok(()) => MutationOutcome {
                index: None,
                persisted: true,
                warning: None,
            },
            Err(err) => {
                warn!(
                    "event=preference_save module=session status=error key={} error={}",
                    self.config.dark_mode_key, err
                );
                MutationOutcome {
                    index: None,
                    persisted: false,
                    warning: Some(format!("Preference could not be saved: {err}")),
                }
            }
        };
        info!("event=dark_mode_toggle module=session status=ok enabled={}", self.dark_mode);
        (self.dark_mode, outcome)
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// CSV export of the full roster.
    pub fn export_csv(&self) -> SessionResult<String> {
        let csv = export_csv(self.roster.guests())?;
        info!("event=export_csv module=session status=ok rows={}", self.roster.len());
        Ok(csv)
    }

    /// Printable report of the full roster with summary counts.
    pub fn print_report(&self) -> String {
        print_report(self.roster.guests())
    }

    /// Dispatches a key event through the shortcut table.
    ///
    /// Returns `None` when the event should pass through to the host. Undo,
    /// dark mode and help visibility are applied here; other actions are
    /// returned for the presentation layer to perform.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<KeyDispatch> {
        let action = self.shortcuts.dispatch(event)?;

        let effect = match action {
            ShortcutAction::UndoRemoval => match self.undo_last_removal() {
                Ok(outcome) => KeyEffect::Undone(outcome),
                Err(SessionError::Validation(err)) => KeyEffect::UndoRejected(err),
                Err(_) => KeyEffect::NothingToUndo,
            },
            ShortcutAction::ToggleDarkMode => {
                let (enabled, outcome) = self.toggle_dark_mode();
                KeyEffect::DarkMode { enabled, outcome }
            }
            ShortcutAction::ToggleHelp => {
                self.help_visible = !self.help_visible;
                KeyEffect::HelpVisible(self.help_visible)
            }
            ShortcutAction::CloseHelp => {
                if !self.help_visible {
                    return None;
                }
                self.help_visible = false;
                KeyEffect::HelpVisible(false)
            }
            ShortcutAction::FocusNameInput
            | ShortcutAction::FocusSearch
            | ShortcutAction::ExportCsv
            | ShortcutAction::Print => KeyEffect::Presentation,
        };

        debug!("event=shortcut module=session status=ok action={action:?}");
        Some(KeyDispatch { action, effect })
    }

    fn checked_rename(&self, index: usize, name: &str) -> SessionResult<String> {
        if !self.config.validate_on_rename {
            return Ok(name.trim().to_string());
        }
        validate_guest_rename(name, self.roster.guests(), index).map_err(|err| {
            debug!("event=guest_rename module=session status=rejected index={index} reason={err:?}");
            SessionError::from(err)
        })
    }

    fn check_index(&self, event: &'static str, index: usize) -> SessionResult<()> {
        if index >= self.roster.len() {
            return Err(stale_index(
                event,
                RosterError::IndexOutOfRange {
                    index,
                    len: self.roster.len(),
                },
            ));
        }
        Ok(())
    }

    fn persist_roster(&self, index: Option<usize>) -> MutationOutcome {
        match save_roster(&self.gateway, &self.config.storage_key, &self.roster) {
            Ok(()) => MutationOutcome {
                index,
                persisted: true,
                warning: None,
            },
            Err(err) => {
                warn!(
                    "event=roster_save module=session status=error key={} total={} error={}",
                    self.config.storage_key,
                    self.roster.len(),
                    err
                );
                MutationOutcome {
                    index,
                    persisted: false,
                    warning: Some(format!("Changes could not be saved: {err}")),
                }
            }
        }
    }
}

fn stale_index(event: &'static str, err: RosterError) -> SessionError {
    warn!("event={event} module=session status=stale_index error={err}");
    SessionError::Roster(err)
}

fn source_label(source: RosterSource) -> &'static str {
    match source {
        RosterSource::Stored => "stored",
        RosterSource::SeedMissing => "seed",
        RosterSource::SeedRecovered => "seed_recovered",
        RosterSource::Empty => "empty",
    }
}
