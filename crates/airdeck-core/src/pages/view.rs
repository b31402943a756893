//! View identities and the state carried by each view.

use crate::app_state::Reading;

/// Kinds of screen the panel can show. Menu entries name their target by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Welcome,
    Menu,
    Temperature,
    Humidity,
    Visibility,
    SelectArea,
    Confirm,
}

/// Option highlighted on the confirm view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmChoice {
    #[default]
    Yes,
    No,
}

impl ConfirmChoice {
    pub const fn toggled(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConfirmChoice::Yes => "Yes",
            ConfirmChoice::No => "No",
        }
    }
}

/// The view the panel is in, with its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Welcome,
    /// Main menu with the highlighted entry.
    Menu(usize),
    /// Single telemetry value.
    Detail(Reading),
    /// City list with the highlighted city.
    CitySelect(usize),
    /// Confirmation for switching to `proposed`.
    Confirm {
        choice: ConfirmChoice,
        proposed: usize,
    },
}

impl View {
    pub const fn kind(&self) -> ViewKind {
        match self {
            View::Welcome => ViewKind::Welcome,
            View::Menu(_) => ViewKind::Menu,
            View::Detail(Reading::Temperature) => ViewKind::Temperature,
            View::Detail(Reading::Humidity) => ViewKind::Humidity,
            View::Detail(Reading::Visibility) => ViewKind::Visibility,
            View::CitySelect(_) => ViewKind::SelectArea,
            View::Confirm { .. } => ViewKind::Confirm,
        }
    }

    /// List views pause after drawing so one swipe moves the cursor once.
    pub const fn settles(&self) -> bool {
        matches!(self, View::Menu(_) | View::CitySelect(_) | View::Confirm { .. })
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Make the carried city index the selected city.
    CommitCity(usize),
}

/// Outcome of one gesture: the next view and an optional action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Transition {
    pub next: View,
    pub action: Option<Action>,
}

impl Transition {
    pub const fn to(next: View) -> Self {
        Self { next, action: None }
    }

    pub const fn with(next: View, action: Action) -> Self {
        Self {
            next,
            action: Some(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_each_view() {
        assert_eq!(View::Welcome.kind(), ViewKind::Welcome);
        assert_eq!(View::Menu(3).kind(), ViewKind::Menu);
        assert_eq!(View::Detail(Reading::Humidity).kind(), ViewKind::Humidity);
        assert_eq!(View::CitySelect(1).kind(), ViewKind::SelectArea);
        assert_eq!(
            View::Confirm { choice: ConfirmChoice::No, proposed: 0 }.kind(),
            ViewKind::Confirm
        );
    }

    #[test]
    fn test_only_list_views_settle() {
        assert!(View::Menu(0).settles());
        assert!(View::CitySelect(0).settles());
        assert!(View::Confirm { choice: ConfirmChoice::Yes, proposed: 2 }.settles());
        assert!(!View::Welcome.settles());
        assert!(!View::Detail(Reading::Temperature).settles());
    }

    #[test]
    fn test_choice_toggles() {
        assert_eq!(ConfirmChoice::default(), ConfirmChoice::Yes);
        assert_eq!(ConfirmChoice::Yes.toggled(), ConfirmChoice::No);
        assert_eq!(ConfirmChoice::No.toggled().toggled(), ConfirmChoice::No);
    }
}
