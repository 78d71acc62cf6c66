//! Wire and storage DTOs for the auth/profile REST API.
//!
//! DESIGN
//! ======
//! Field names follow the API's camelCase JSON. Profile fields default when
//! absent so partially populated server records and older cached copies still
//! decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user's identity and bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Self-reported training level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }
}

/// Workout preferences edited on the profile page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Preferred session length in minutes.
    pub workout_duration: u32,
    /// Preferred sessions per week.
    pub workout_frequency: u32,
    pub accessibility_needs: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { workout_duration: 30, workout_frequency: 3, accessibility_needs: Vec::new() }
    }
}

/// Usage statistics shown on the dashboard and profile pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileStats {
    pub workouts_completed: u32,
    pub total_minutes: u32,
    pub streak_days: u32,
    pub goals_achieved: u32,
}

/// A user's fitness/wellness profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// ISO date (`YYYY-MM-DD`), empty when unset.
    pub date_of_birth: String,
    pub fitness_level: FitnessLevel,
    pub goals: Vec<String>,
    pub preferences: Preferences,
    pub stats: ProfileStats,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp of the last edit.
    pub updated_at: String,
}

/// Partial profile update. Present fields replace the profile's top-level
/// fields wholesale; `preferences` is not merged field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl ProfilePatch {
    /// Copy every present field onto `profile`. Timestamps are left alone.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(v) = &self.first_name {
            profile.first_name.clone_from(v);
        }
        if let Some(v) = &self.last_name {
            profile.last_name.clone_from(v);
        }
        if let Some(v) = &self.email {
            profile.email.clone_from(v);
        }
        if let Some(v) = &self.date_of_birth {
            profile.date_of_birth.clone_from(v);
        }
        if let Some(v) = self.fitness_level {
            profile.fitness_level = v;
        }
        if let Some(v) = &self.goals {
            profile.goals.clone_from(v);
        }
        if let Some(v) = &self.preferences {
            profile.preferences.clone_from(v);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Unconfirmed (or freshly confirmed) account record kept in local storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    pub id: String,
    pub email: String,
    pub confirmation_token: String,
    #[serde(default)]
    pub email_confirmed: bool,
}

/// Optional extra fields sent with a registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// What the backend hands back for a successful registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub id: String,
    pub confirmation_token: String,
}

// =============================================================================
// REQUEST / RESPONSE BODIES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(flatten)]
    pub details: &'a RegistrationDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
    pub confirmation_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendConfirmationRequest<'a> {
    pub email: &'a str,
    pub confirmation_token: &'a str,
    pub confirmation_url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailRequest<'a> {
    pub confirmation_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

impl LoginResponse {
    #[must_use]
    pub fn into_session(self) -> Session {
        Session { id: self.user.id, token: self.token, email: self.user.email }
    }
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}
