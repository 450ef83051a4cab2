//! User profile panel.
//!
//! The panel shows one [`UserProfile`] record. Changing it swaps the whole
//! record for a preset; nothing is merged field by field, so the claims of the
//! previous profile are never shared with the new one.

use serde::{Deserialize, Serialize};
use statekit_core::{reducer::Reducer, state::Version};
use statekit_macros::{Action, State};
use std::sync::Arc;

/// Identity claims attached to a profile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, or a placeholder when unknown
    pub uid: String,
}

/// A user's contact record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Identity claims
    pub claims: Claims,
    /// Location ids the user is attached to
    pub locations: Vec<u32>,
}

impl UserProfile {
    /// Profile shown at startup
    #[must_use]
    pub fn initial() -> Self {
        Self {
            full_name: "Avery Example".to_string(),
            email: "avery@example.com".to_string(),
            phone: "0700000001".to_string(),
            claims: Claims {
                uid: "30533847".to_string(),
            },
            locations: (0..=5).collect(),
        }
    }

    /// Profile swapped in by "change profile"
    #[must_use]
    pub fn replacement() -> Self {
        Self {
            full_name: "Jordan Sample".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "0700000002".to_string(),
            claims: Claims {
                uid: "NOT AVAILABLE".to_string(),
            },
            locations: (6..=10).collect(),
        }
    }
}

impl std::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} <{}> {} uid={} locations={:?}",
            self.full_name, self.email, self.phone, self.claims.uid, self.locations
        )
    }
}

/// The two profiles the panel switches between
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfilePresets {
    /// Shown at startup and restored by reset
    pub initial: UserProfile,
    /// Swapped in by change
    pub replacement: UserProfile,
}

impl Default for ProfilePresets {
    fn default() -> Self {
        Self {
            initial: UserProfile::initial(),
            replacement: UserProfile::replacement(),
        }
    }
}

/// Environment for the profile reducer
#[derive(Clone, Debug, Default)]
pub struct ProfileEnvironment {
    /// Presets to switch between
    pub presets: Arc<ProfilePresets>,
}

/// State of the profile panel
#[derive(State, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileState {
    /// Profile currently shown
    pub profile: UserProfile,
    /// Bumped whenever the record is replaced
    #[version]
    pub version: Version,
}

impl ProfileState {
    /// Panel showing `profile` at version zero
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            version: Version::default(),
        }
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::new(UserProfile::initial())
    }
}

/// Profile panel actions
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum ProfileAction {
    /// Command: Replace the profile with the replacement preset
    #[command]
    ChangeProfile,

    /// Command: Restore the initial preset
    #[command]
    ResetProfile,
}

/// Reducer for the profile panel
#[derive(Clone, Debug, Default)]
pub struct ProfileReducer;

impl ProfileReducer {
    /// Creates a new `ProfileReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn replace(state: &mut ProfileState, profile: UserProfile) {
        if state.profile == profile {
            tracing::debug!("Profile unchanged");
            return;
        }

        tracing::info!(previous = %state.profile, "Replacing profile");
        state.profile = profile;
        state.bump_version();
        tracing::info!(updated = %state.profile, version = %state.version, "Profile replaced");
    }
}

impl Reducer for ProfileReducer {
    type State = ProfileState;
    type Action = ProfileAction;
    type Environment = ProfileEnvironment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        let preset = match action {
            ProfileAction::ChangeProfile => &env.presets.replacement,
            ProfileAction::ResetProfile => &env.presets.initial,
        };
        tracing::debug!(command = action.name(), "Profile command");
        Self::replace(state, preset.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statekit_testing::ReducerTest;

    #[test]
    fn change_replaces_whole_record() {
        ReducerTest::new(ProfileReducer::new())
            .with_env(ProfileEnvironment::default())
            .given_state(ProfileState::default())
            .when_action(ProfileAction::ChangeProfile)
            .then_state(|state| {
                assert_eq!(state.profile, UserProfile::replacement());
                assert_eq!(state.profile.claims.uid, "NOT AVAILABLE");
                assert_eq!(state.profile.locations, vec![6, 7, 8, 9, 10]);
            })
            .then_version(Version::new(1))
            .run();
    }

    #[test]
    fn change_twice_keeps_version() {
        ReducerTest::new(ProfileReducer::new())
            .with_env(ProfileEnvironment::default())
            .given_state(ProfileState::default())
            .when_action(ProfileAction::ChangeProfile)
            .and_action(ProfileAction::ChangeProfile)
            .then_version(Version::new(1))
            .run();
    }

    #[test]
    fn reset_on_initial_profile_changes_nothing() {
        ReducerTest::new(ProfileReducer::new())
            .with_env(ProfileEnvironment::default())
            .given_state(ProfileState::default())
            .when_action(ProfileAction::ResetProfile)
            .then_unchanged()
            .run();
    }

    #[test]
    fn reset_restores_initial() {
        ReducerTest::new(ProfileReducer::new())
            .with_env(ProfileEnvironment::default())
            .given_state(ProfileState::new(UserProfile::replacement()))
            .when_action(ProfileAction::ResetProfile)
            .then_state(|state| {
                assert_eq!(state.profile, UserProfile::initial());
                assert_eq!(state.profile.locations, vec![0, 1, 2, 3, 4, 5]);
            })
            .run();
    }

    #[test]
    fn presets_come_from_environment() {
        let mut presets = ProfilePresets::default();
        presets.replacement.full_name = "Riley Test".to_string();
        let env = ProfileEnvironment {
            presets: Arc::new(presets),
        };

        ReducerTest::new(ProfileReducer::new())
            .with_env(env)
            .given_state(ProfileState::default())
            .when_action(ProfileAction::ChangeProfile)
            .then_state(|state| {
                assert_eq!(state.profile.full_name, "Riley Test");
            })
            .run();
    }

    #[test]
    fn replacing_does_not_alias_previous_claims() {
        let before = ProfileState::default();
        let mut after = before.clone();
        ProfileReducer::new().reduce(
            &mut after,
            ProfileAction::ChangeProfile,
            &ProfileEnvironment::default(),
        );

        assert_eq!(before.profile.claims.uid, "30533847");
        assert_ne!(before.profile.claims, after.profile.claims);
    }
}
