use super::*;

fn filled_form() -> ProfileForm {
    ProfileForm {
        first_name: "Jane".to_owned(),
        last_name: "Roe".to_owned(),
        email: "jane@example.com".to_owned(),
        date_of_birth: "1992-04-03".to_owned(),
        fitness_level: FitnessLevel::Advanced,
        goals: vec!["endurance".to_owned()],
        workout_duration: 45,
        workout_frequency: 5,
        accessibility_needs: vec!["visual_impairment".to_owned()],
    }
}

#[test]
fn from_profile_copies_fields_and_defaults_zero_preferences() {
    let mut profile = UserProfile {
        first_name: "John".to_owned(),
        goals: vec!["flexibility".to_owned()],
        ..UserProfile::default()
    };
    profile.preferences.workout_duration = 0;
    profile.preferences.workout_frequency = 0;

    let form = ProfileForm::from_profile(&profile);
    assert_eq!(form.first_name, "John");
    assert_eq!(form.goals, vec!["flexibility".to_owned()]);
    assert_eq!(form.workout_duration, 30);
    assert_eq!(form.workout_frequency, 3);
}

#[test]
fn validate_accepts_complete_form() {
    assert!(filled_form().validate().is_empty());
}

#[test]
fn validate_flags_every_missing_required_field() {
    let form = ProfileForm {
        first_name: "  ".to_owned(),
        last_name: String::new(),
        email: String::new(),
        date_of_birth: String::new(),
        ..filled_form()
    };
    let errors = form.validate();
    assert_eq!(errors.get(&ProfileField::FirstName), Some(&"First name is required"));
    assert_eq!(errors.get(&ProfileField::LastName), Some(&"Last name is required"));
    assert_eq!(errors.get(&ProfileField::Email), Some(&"Email is required"));
    assert_eq!(errors.get(&ProfileField::DateOfBirth), Some(&"Date of birth is required"));
}

#[test]
fn validate_rejects_implausible_email() {
    let form = ProfileForm { email: "jane@example".to_owned(), ..filled_form() };
    let errors = form.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(&ProfileField::Email), Some(&"Email is invalid"));
}

#[test]
fn to_patch_carries_every_field_and_nests_preferences() {
    let patch = filled_form().to_patch();
    assert_eq!(patch.first_name.as_deref(), Some("Jane"));
    assert_eq!(patch.fitness_level, Some(FitnessLevel::Advanced));
    let prefs = patch.preferences.expect("preferences present");
    assert_eq!(prefs.workout_duration, 45);
    assert_eq!(prefs.workout_frequency, 5);
    assert_eq!(prefs.accessibility_needs, vec!["visual_impairment".to_owned()]);
}

#[test]
fn patch_applied_to_profile_matches_form() {
    let form = filled_form();
    let mut profile = UserProfile { id: "u1".to_owned(), ..UserProfile::default() };
    form.to_patch().apply_to(&mut profile);
    assert_eq!(profile.id, "u1");
    assert_eq!(ProfileForm::from_profile(&profile), form);
}

#[test]
fn set_tag_adds_once_and_removes() {
    let mut tags = vec!["endurance".to_owned()];
    set_tag(&mut tags, "flexibility", true);
    set_tag(&mut tags, "flexibility", true);
    assert_eq!(tags, vec!["endurance".to_owned(), "flexibility".to_owned()]);
    set_tag(&mut tags, "endurance", false);
    assert_eq!(tags, vec!["flexibility".to_owned()]);
}

#[test]
fn text_mut_edits_the_named_field() {
    let mut form = filled_form();
    *form.text_mut(ProfileField::LastName) = "Doe".to_owned();
    assert_eq!(form.text(ProfileField::LastName), "Doe");
    assert_eq!(form.text(ProfileField::FirstName), "Jane");
}

#[test]
fn frequency_label_reads_naturally() {
    assert_eq!(frequency_label(1), "1 time per week");
    assert_eq!(frequency_label(3), "3 times per week");
    assert_eq!(frequency_label(7), "Daily");
}

// =========================================================================
// ProfileEditor
// =========================================================================

fn profile(id: &str) -> UserProfile {
    UserProfile {
        id: id.to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        email: "john@example.com".to_owned(),
        date_of_birth: "1990-01-01".to_owned(),
        ..UserProfile::default()
    }
}

fn editing(profile: &UserProfile) -> ProfileEditor {
    let mut editor = ProfileEditor::default();
    editor.sync_from(profile);
    editor.start_editing();
    editor
}

#[test]
fn sync_keeps_unsaved_edits() {
    let current = profile("u1");
    let mut editor = editing(&current);
    editor.edit_text(ProfileField::FirstName, "Jack".to_owned());

    let mut republished = current.clone();
    republished.last_name = "Smith".to_owned();
    editor.sync_from(&republished);

    assert!(editor.editing);
    assert_eq!(editor.form.first_name, "Jack");
    assert_eq!(editor.form.last_name, "Doe");
}

#[test]
fn sync_from_another_user_starts_fresh() {
    let mut editor = editing(&profile("u1"));
    editor.status = UpdateStatus::Failed;

    let other = UserProfile { first_name: "Ann".to_owned(), ..profile("u2") };
    editor.sync_from(&other);

    assert_eq!(editor.profile_id, "u2");
    assert!(!editor.editing);
    assert_eq!(editor.status, UpdateStatus::Idle);
    assert_eq!(editor.form.first_name, "Ann");
}

#[test]
fn edit_text_clears_that_fields_error() {
    let mut editor = editing(&profile("u1"));
    editor.edit_text(ProfileField::Email, String::new());
    editor.edit_text(ProfileField::LastName, String::new());
    assert!(editor.begin_save().is_none());
    assert_eq!(editor.errors.len(), 2);

    editor.edit_text(ProfileField::Email, "jo@example.com".to_owned());
    assert!(!editor.errors.contains_key(&ProfileField::Email));
    assert!(editor.errors.contains_key(&ProfileField::LastName));
}

#[test]
fn begin_save_refuses_while_a_save_is_running() {
    let mut editor = editing(&profile("u1"));
    assert!(editor.begin_save().is_some());
    assert!(editor.is_saving());
    assert!(editor.begin_save().is_none());
}

#[test]
fn failed_save_keeps_form_open_with_edits() {
    let mut editor = editing(&profile("u1"));
    editor.edit_text(ProfileField::FirstName, "Jack".to_owned());
    let _patch = editor.begin_save().unwrap();

    editor.finish_save(None);

    assert_eq!(editor.status, UpdateStatus::Failed);
    assert!(editor.editing);
    assert_eq!(editor.form.first_name, "Jack");
}

#[test]
fn successful_save_leaves_edit_mode() {
    let mut editor = editing(&profile("u1"));
    editor.edit_text(ProfileField::FirstName, "Jack".to_owned());
    let patch = editor.begin_save().unwrap();

    let mut saved = profile("u1");
    patch.apply_to(&mut saved);
    editor.finish_save(Some(&saved));

    assert_eq!(editor.status, UpdateStatus::Success);
    assert!(!editor.editing);
    assert_eq!(editor.form.first_name, "Jack");
}

#[test]
fn clear_status_leaves_a_running_save_alone() {
    let mut editor = editing(&profile("u1"));
    editor.status = UpdateStatus::Success;
    editor.clear_status();
    assert_eq!(editor.status, UpdateStatus::Idle);

    let _patch = editor.begin_save().unwrap();
    editor.clear_status();
    assert_eq!(editor.status, UpdateStatus::Updating);
}

#[test]
fn cancel_discards_edits() {
    let current = profile("u1");
    let mut editor = editing(&current);
    editor.edit_text(ProfileField::FirstName, String::new());
    assert!(editor.begin_save().is_none());

    editor.cancel(Some(&current));

    assert!(!editor.editing);
    assert!(editor.errors.is_empty());
    assert_eq!(editor.form, ProfileForm::from_profile(&current));
}

// The route guard shows its loading placeholder while the store saves, which
// drops the page. The save result must survive in the editor.
#[tokio::test]
async fn save_result_outlives_guard_placeholder() {
    use std::sync::{Arc, Mutex};

    use crate::net::backend::DevMockBackend;
    use crate::state::session::SessionStore;
    use crate::util::auth::{GuardDecision, guard_decision};
    use crate::util::storage::MemoryStorage;

    let decisions = Arc::new(Mutex::new(Vec::new()));
    let storage = Arc::new(MemoryStorage::new());
    let backend = Arc::new(DevMockBackend::new(storage.clone()));
    let store = SessionStore::new(backend, storage, "http://localhost:3000").with_observer({
        let decisions = decisions.clone();
        move |state: &AuthState| decisions.lock().unwrap().push(guard_decision(state))
    });
    store.initialize().await;
    store.register("jo@example.com", "hunter22", None).await.unwrap();
    let token = store.ledger().pending_for("jo@example.com").unwrap().confirmation_token;
    store.confirm_email(&token).await.unwrap();
    store.login("jo@example.com", "hunter22").await.unwrap();

    let mut editor = ProfileEditor::default();
    editor.sync_from(&store.snapshot().profile.unwrap());
    editor.start_editing();
    editor.edit_text(ProfileField::FirstName, "Jo".to_owned());
    let patch = editor.begin_save().unwrap();

    decisions.lock().unwrap().clear();
    let saved = store.update_profile(&patch).await;
    editor.finish_save(saved.as_ref().ok());

    let decisions = decisions.lock().unwrap();
    assert!(decisions.contains(&GuardDecision::Loading));
    assert_eq!(decisions.last(), Some(&GuardDecision::Allow));

    // The page rebuilt after the placeholder resyncs from the new profile.
    editor.sync_from(&store.snapshot().profile.unwrap());
    assert_eq!(editor.status, UpdateStatus::Success);
    assert!(!editor.editing);
    assert_eq!(editor.form.first_name, "Jo");
}
