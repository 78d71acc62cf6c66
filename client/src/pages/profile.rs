//! Profile page: view the signed-in user's profile and edit it in place.
//!
//! ARCHITECTURE
//! ============
//! A [`ProfileEditor`] holds an editable [`ProfileForm`] copy of the
//! published profile plus the save status. It lives in an `App` context, not
//! in the page, because the route guard tears the page down while a save is
//! in flight. Saving validates the form, turns it into a [`ProfilePatch`] and
//! hands it to the session store, which merges and publishes the result.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::net::types::{FitnessLevel, Preferences, ProfilePatch, UserProfile};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::format::{display_date, humanize_list, humanize_tag};
use crate::util::validate::is_plausible_email;

pub const GOAL_OPTIONS: [&str; 6] =
    ["weight_loss", "muscle_gain", "strength_building", "endurance", "flexibility", "general_fitness"];
pub const NEED_OPTIONS: [&str; 5] =
    ["mobility_assistance", "visual_impairment", "hearing_impairment", "cognitive_support", "chronic_conditions"];
pub const DURATION_OPTIONS: [u32; 5] = [15, 30, 45, 60, 90];
pub const FREQUENCY_OPTIONS: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];
pub const STATUS_CLEAR_MS: u32 = 3_000;

/// Form fields that carry validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    DateOfBirth,
}

pub type FieldErrors = BTreeMap<ProfileField, &'static str>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStatus {
    #[default]
    Idle,
    Updating,
    Success,
    Failed,
}

/// Editable copy of the profile fields shown in the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub fitness_level: FitnessLevel,
    pub goals: Vec<String>,
    pub workout_duration: u32,
    pub workout_frequency: u32,
    pub accessibility_needs: Vec<String>,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::from_profile(&UserProfile::default())
    }
}

impl ProfileForm {
    /// Seed the form from a profile. Zero preferences fall back to 30 minutes
    /// and 3 sessions a week.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        let defaults = Preferences::default();
        let prefs = &profile.preferences;
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            date_of_birth: profile.date_of_birth.clone(),
            fitness_level: profile.fitness_level,
            goals: profile.goals.clone(),
            workout_duration: if prefs.workout_duration == 0 { defaults.workout_duration } else { prefs.workout_duration },
            workout_frequency: if prefs.workout_frequency == 0 {
                defaults.workout_frequency
            } else {
                prefs.workout_frequency
            },
            accessibility_needs: prefs.accessibility_needs.clone(),
        }
    }

    /// Every failing field with its message; empty when the form can be saved.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.first_name.trim().is_empty() {
            errors.insert(ProfileField::FirstName, "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.insert(ProfileField::LastName, "Last name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert(ProfileField::Email, "Email is required");
        } else if !is_plausible_email(&self.email) {
            errors.insert(ProfileField::Email, "Email is invalid");
        }
        if self.date_of_birth.is_empty() {
            errors.insert(ProfileField::DateOfBirth, "Date of birth is required");
        }
        errors
    }

    /// Patch carrying every editable field.
    #[must_use]
    pub fn to_patch(&self) -> ProfilePatch {
        ProfilePatch {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            date_of_birth: Some(self.date_of_birth.clone()),
            fitness_level: Some(self.fitness_level),
            goals: Some(self.goals.clone()),
            preferences: Some(Preferences {
                workout_duration: self.workout_duration,
                workout_frequency: self.workout_frequency,
                accessibility_needs: self.accessibility_needs.clone(),
            }),
        }
    }

    /// Mutable handle to a text field.
    pub fn text_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::DateOfBirth => &mut self.date_of_birth,
        }
    }

    #[must_use]
    pub fn text(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::DateOfBirth => &self.date_of_birth,
        }
    }
}

/// Add or remove `tag` from a checkbox group, keeping each tag once.
pub fn set_tag(tags: &mut Vec<String>, tag: &str, checked: bool) {
    if checked {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_owned());
        }
    } else {
        tags.retain(|t| t != tag);
    }
}

#[must_use]
pub fn frequency_label(per_week: u32) -> String {
    match per_week {
        7 => "Daily".to_owned(),
        1 => "1 time per week".to_owned(),
        n => format!("{n} times per week"),
    }
}

/// Edit session behind the profile page: view/edit mode, the form, its
/// errors and the save status.
///
/// `App` provides it as an `RwSignal<ProfileEditor>` context so it outlives
/// the page itself; the route guard swaps the page for its loading
/// placeholder while a save is in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileEditor {
    /// Profile the form was last seeded from.
    pub profile_id: String,
    pub editing: bool,
    pub form: ProfileForm,
    pub errors: FieldErrors,
    pub status: UpdateStatus,
}

impl ProfileEditor {
    /// Follow the published profile. Unsaved edits are kept; a different
    /// user's profile starts a fresh session.
    pub fn sync_from(&mut self, profile: &UserProfile) {
        if self.profile_id != profile.id {
            *self = Self { profile_id: profile.id.clone(), ..Self::default() };
        }
        if !self.editing {
            self.form = ProfileForm::from_profile(profile);
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Leave edit mode and drop unsaved changes.
    pub fn cancel(&mut self, profile: Option<&UserProfile>) {
        self.editing = false;
        self.errors.clear();
        if let Some(profile) = profile {
            self.form = ProfileForm::from_profile(profile);
        }
    }

    /// Set one text field and clear its error.
    pub fn edit_text(&mut self, field: ProfileField, value: String) {
        *self.form.text_mut(field) = value;
        self.errors.remove(&field);
    }

    /// Validate and mark a save in flight. `None` when the form is invalid or
    /// a save is already running.
    pub fn begin_save(&mut self) -> Option<ProfilePatch> {
        if self.status == UpdateStatus::Updating {
            return None;
        }
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return None;
        }
        self.status = UpdateStatus::Updating;
        Some(self.form.to_patch())
    }

    /// Record the save result. On failure the form stays open with the edits.
    pub fn finish_save(&mut self, saved: Option<&UserProfile>) {
        match saved {
            Some(profile) => {
                self.status = UpdateStatus::Success;
                self.editing = false;
                self.form = ProfileForm::from_profile(profile);
            }
            None => self.status = UpdateStatus::Failed,
        }
    }

    /// Hide the save result. A save started since is left alone.
    pub fn clear_status(&mut self) {
        if self.status != UpdateStatus::Updating {
            self.status = UpdateStatus::Idle;
        }
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.status == UpdateStatus::Updating
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<SessionStore>();
    let editor = expect_context::<RwSignal<ProfileEditor>>();

    // Loading-flag flips must not rebuild the form.
    let published = Memo::new(move |_| auth.get().profile);

    Effect::new(move || {
        if let Some(profile) = published.get() {
            editor.update(|e| e.sync_from(&profile));
        }
    });

    let saving = move || editor.with(ProfileEditor::is_saving);
    let on_cancel = move |_| {
        let profile = auth.get_untracked().profile;
        editor.update(|e| e.cancel(profile.as_ref()));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut patch = None;
        editor.update(|e| patch = e.begin_save());
        let Some(patch) = patch else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                match store.update_profile(&patch).await {
                    Ok(saved) => editor.update(|e| e.finish_save(Some(&saved))),
                    Err(e) => {
                        log::warn!("profile update failed [{}]: {e}", e.code());
                        editor.update(|e| e.finish_save(None));
                    }
                }
                gloo_timers::future::TimeoutFuture::new(STATUS_CLEAR_MS).await;
                editor.update(ProfileEditor::clear_status);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&store, patch);
    };

    view! {
        <div class="profile-page">
            {move || match published.get() {
                None => view! {
                    <div class="profile-page__error" aria-live="assertive">
                        "Unable to load profile. Please try refreshing the page."
                    </div>
                }
                .into_any(),
                Some(profile) => {
                    let on_submit = on_submit.clone();
                    view! {
                        <header class="profile-header">
                            <h1>"Your Profile"</h1>
                            <StatusBanner editor=editor/>
                        </header>
                        <div class="profile-content">
                            <section class="profile-info" aria-labelledby="profile-info-heading">
                                <div class="profile-info__header">
                                    <h2 id="profile-info-heading">"Personal Information"</h2>
                                    <Show when=move || !editor.with(|e| e.editing)>
                                        <button
                                            class="btn"
                                            aria-label="Edit profile information"
                                            on:click=move |_| editor.update(ProfileEditor::start_editing)
                                        >
                                            "Edit Profile"
                                        </button>
                                    </Show>
                                </div>
                                <Show
                                    when=move || editor.with(|e| e.editing)
                                    fallback={
                                        let profile = profile.clone();
                                        move || view! { <ProfileSummary profile=profile.clone()/> }
                                    }
                                >
                                    <form class="profile-form" aria-label="Edit profile form" on:submit=on_submit.clone()>
                                        <div class="profile-form__row">
                                            <TextField editor=editor field=ProfileField::FirstName label="First Name" input_type="text"/>
                                            <TextField editor=editor field=ProfileField::LastName label="Last Name" input_type="text"/>
                                        </div>
                                        <TextField editor=editor field=ProfileField::Email label="Email" input_type="email"/>
                                        <TextField editor=editor field=ProfileField::DateOfBirth label="Date of Birth" input_type="date"/>
                                        <PreferenceFields editor=editor/>
                                        <div class="profile-form__actions">
                                            <button
                                                class="btn"
                                                type="submit"
                                                disabled=saving
                                                aria-label=move || {
                                                    if saving() { "Saving profile changes" } else { "Save profile changes" }
                                                }
                                            >
                                                {move || if saving() { "Saving..." } else { "Save Changes" }}
                                            </button>
                                            <button
                                                class="btn btn--secondary"
                                                type="button"
                                                disabled=saving
                                                on:click=on_cancel
                                            >
                                                "Cancel"
                                            </button>
                                        </div>
                                    </form>
                                </Show>
                            </section>
                            <ProfileStatsPanel profile=profile/>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn StatusBanner(editor: RwSignal<ProfileEditor>) -> impl IntoView {
    move || match editor.with(|e| e.status) {
        UpdateStatus::Success => Some(view! {
            <div class="update-status update-status--success" aria-live="polite">
                "Profile updated successfully!"
            </div>
        }
        .into_any()),
        UpdateStatus::Failed => Some(view! {
            <div class="update-status update-status--error" aria-live="assertive">
                "Failed to update profile. Please try again."
            </div>
        }
        .into_any()),
        UpdateStatus::Idle | UpdateStatus::Updating => None,
    }
}

/// Labelled text input bound to one validated form field.
#[component]
fn TextField(
    editor: RwSignal<ProfileEditor>,
    field: ProfileField,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    let id = format!("profile-{field:?}").to_ascii_lowercase();
    let error_id = format!("{id}-error");
    let error = move || editor.with(|e| e.errors.get(&field).copied());

    view! {
        <div class="form-group">
            <label for=id.clone()>{label}</label>
            <input
                id=id
                type=input_type
                required
                aria-invalid=move || if error().is_some() { "true" } else { "false" }
                aria-describedby=error_id.clone()
                prop:value=move || editor.with(|e| e.form.text(field).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    editor.update(|e| e.edit_text(field, value));
                }
            />
            <span id=error_id class="form-group__error" role="alert">
                {move || error().unwrap_or_default()}
            </span>
        </div>
    }
}

/// Fitness level, goals, workout schedule and accessibility needs.
#[component]
fn PreferenceFields(editor: RwSignal<ProfileEditor>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for="profile-fitness-level">"Fitness Level"</label>
            <select
                id="profile-fitness-level"
                prop:value=move || editor.with(|e| e.form.fitness_level.as_str())
                on:change=move |ev| {
                    if let Some(level) = FitnessLevel::parse(&event_target_value(&ev)) {
                        editor.update(|e| e.form.fitness_level = level);
                    }
                }
            >
                {FitnessLevel::ALL
                    .iter()
                    .map(|level| view! { <option value=level.as_str()>{level.label()}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </div>

        <fieldset class="form-group">
            <legend>"Fitness Goals"</legend>
            <div class="checkbox-group">
                {GOAL_OPTIONS
                    .iter()
                    .map(|goal| {
                        let goal = *goal;
                        view! {
                            <label class="checkbox-label">
                                <input
                                    type="checkbox"
                                    name="goals"
                                    value=goal
                                    prop:checked=move || editor.with(|e| e.form.goals.iter().any(|g| g == goal))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        editor.update(|e| set_tag(&mut e.form.goals, goal, checked));
                                    }
                                />
                                {humanize_tag(goal)}
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </fieldset>

        <div class="profile-form__row">
            <div class="form-group">
                <label for="profile-duration">"Preferred Workout Duration"</label>
                <select
                    id="profile-duration"
                    prop:value=move || editor.with(|e| e.form.workout_duration.to_string())
                    on:change=move |ev| {
                        if let Ok(minutes) = event_target_value(&ev).parse::<u32>() {
                            editor.update(|e| e.form.workout_duration = minutes);
                        }
                    }
                >
                    {DURATION_OPTIONS
                        .iter()
                        .map(|m| view! { <option value=m.to_string()>{format!("{m} minutes")}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>
            <div class="form-group">
                <label for="profile-frequency">"Workout Frequency"</label>
                <select
                    id="profile-frequency"
                    prop:value=move || editor.with(|e| e.form.workout_frequency.to_string())
                    on:change=move |ev| {
                        if let Ok(per_week) = event_target_value(&ev).parse::<u32>() {
                            editor.update(|e| e.form.workout_frequency = per_week);
                        }
                    }
                >
                    {FREQUENCY_OPTIONS
                        .iter()
                        .map(|n| view! { <option value=n.to_string()>{frequency_label(*n)}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>
        </div>

        <fieldset class="form-group">
            <legend>"Accessibility Needs"</legend>
            <div class="checkbox-group">
                {NEED_OPTIONS
                    .iter()
                    .map(|need| {
                        let need = *need;
                        view! {
                            <label class="checkbox-label">
                                <input
                                    type="checkbox"
                                    name="accessibilityNeeds"
                                    value=need
                                    prop:checked=move || editor.with(|e| e.form.accessibility_needs.iter().any(|n| n == need))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        editor.update(|e| set_tag(&mut e.form.accessibility_needs, need, checked));
                                    }
                                />
                                {humanize_tag(need)}
                            </label>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </fieldset>
    }
}

/// Read-only view of the published profile.
#[component]
fn ProfileSummary(profile: UserProfile) -> impl IntoView {
    let prefs = &profile.preferences;
    let schedule = format!("{} minutes, {}", prefs.workout_duration, frequency_label(prefs.workout_frequency));
    let needs = (!prefs.accessibility_needs.is_empty()).then(|| humanize_list(&prefs.accessibility_needs, ""));

    view! {
        <dl class="profile-summary">
            <div class="profile-summary__item">
                <dt>"Name:"</dt>
                <dd>{format!("{} {}", profile.first_name, profile.last_name)}</dd>
            </div>
            <div class="profile-summary__item">
                <dt>"Email:"</dt>
                <dd>{profile.email.clone()}</dd>
            </div>
            <div class="profile-summary__item">
                <dt>"Date of Birth:"</dt>
                <dd>{display_date(&profile.date_of_birth)}</dd>
            </div>
            <div class="profile-summary__item">
                <dt>"Fitness Level:"</dt>
                <dd>{profile.fitness_level.label()}</dd>
            </div>
            <div class="profile-summary__item">
                <dt>"Goals:"</dt>
                <dd>{humanize_list(&profile.goals, "No goals set")}</dd>
            </div>
            <div class="profile-summary__item">
                <dt>"Workout Preferences:"</dt>
                <dd>{schedule}</dd>
            </div>
            {needs.map(|needs| {
                view! {
                    <div class="profile-summary__item">
                        <dt>"Accessibility Needs:"</dt>
                        <dd>{needs}</dd>
                    </div>
                }
            })}
        </dl>
    }
}

#[component]
fn ProfileStatsPanel(profile: UserProfile) -> impl IntoView {
    let stats = profile.stats;
    let cards = [
        (stats.workouts_completed, "Workouts Completed"),
        (stats.total_minutes, "Total Minutes"),
        (stats.streak_days, "Current Streak (Days)"),
        (stats.goals_achieved, "Goals Achieved"),
    ];

    view! {
        <section class="profile-stats" aria-labelledby="profile-stats-heading">
            <h2 id="profile-stats-heading">"Your Progress"</h2>
            <div class="profile-stats__grid">
                {cards
                    .into_iter()
                    .map(|(value, label)| {
                        view! {
                            <div class="stat-card">
                                <div class="stat-card__number">{value}</div>
                                <div class="stat-card__label">{label}</div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
