use taskdeck_application::{AppConfig, AppServices};
use taskdeck_core::event::AppEvent;
use taskdeck_core::theme::ThemeMode;
use taskdeck_interaction::ApiConfig;
use tempfile::TempDir;

// Claims: {"sub":"ada@example.com","user_id":"user-7","exp":4102444800}
const FAKE_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJhZGFAZXhhbXBsZS5jb20iLCJ1c2VyX2lkIjoidXNlci03IiwiZXhwIjo0MTAyNDQ0ODAwfQ.sig";

fn config_in(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        api: ApiConfig::new("http://localhost:8000"),
        preferences_path: Some(temp_dir.path().join("preferences.toml")),
        host_theme: ThemeMode::Light,
    }
}

#[tokio::test]
async fn test_fresh_start_resolves_to_signed_out() {
    let temp_dir = TempDir::new().unwrap();
    let mut services = AppServices::initialize(config_in(&temp_dir)).unwrap();
    services.start();

    let snapshot = services.session.snapshot();
    assert!(!snapshot.is_authenticated);
    assert!(!snapshot.is_loading);
    assert!(services.assistant().is_none());
    assert_eq!(services.theme.current(), ThemeMode::Light);
}

#[tokio::test]
async fn test_persisted_token_restores_session_across_restart() {
    let temp_dir = TempDir::new().unwrap();

    // First run: store the token the way a login would.
    {
        let services = AppServices::initialize(config_in(&temp_dir)).unwrap();
        services.preferences.set_access_token(FAKE_TOKEN).unwrap();
    }

    // Second run over the same preferences file.
    let mut services = AppServices::initialize(config_in(&temp_dir)).unwrap();
    services.start();

    let snapshot = services.session.snapshot();
    assert!(snapshot.is_authenticated);
    assert_eq!(snapshot.user_id(), Some("user-7"));
    assert_eq!(
        snapshot.user.as_ref().unwrap().email,
        "ada@example.com"
    );

    let assistant = services.assistant().unwrap();
    assert!(assistant.state().messages.is_empty());
}

#[tokio::test]
async fn test_unauthorized_signal_signs_out_and_clears_token() {
    let temp_dir = TempDir::new().unwrap();
    let mut services = AppServices::initialize(config_in(&temp_dir)).unwrap();
    services.preferences.set_access_token(FAKE_TOKEN).unwrap();
    services.start();
    assert!(services.session.snapshot().is_authenticated);

    let mut observer = services.session.subscribe();
    services.events.publish(AppEvent::Unauthorized);
    observer.changed().await.unwrap();

    assert!(!services.session.snapshot().is_authenticated);
    assert!(services.preferences.access_token().is_none());
}

#[tokio::test]
async fn test_theme_preference_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let services = AppServices::initialize(config_in(&temp_dir)).unwrap();
        services.theme.set_theme(ThemeMode::Dark);
    }

    let services = AppServices::initialize(config_in(&temp_dir)).unwrap();
    assert_eq!(services.theme.current(), ThemeMode::Dark);
}

#[tokio::test]
async fn test_host_theme_only_applies_while_unpersisted() {
    let temp_dir = TempDir::new().unwrap();
    let mut services = AppServices::initialize(config_in(&temp_dir)).unwrap();
    services.start();

    let mut observer = services.theme.subscribe();
    services.host_theme.set(ThemeMode::Dark);
    observer.changed().await.unwrap();
    assert_eq!(services.theme.current(), ThemeMode::Dark);

    // An explicit pick pins the theme against further host changes.
    services.theme.set_theme(ThemeMode::Dark);
    services.host_theme.set(ThemeMode::Light);
    tokio::task::yield_now().await;
    assert_eq!(services.theme.current(), ThemeMode::Dark);
}

#[tokio::test]
async fn test_task_list_view_detaches_on_teardown() {
    let temp_dir = TempDir::new().unwrap();
    let mut services = AppServices::initialize(config_in(&temp_dir)).unwrap();
    services.start();

    let (model, listener) = services.task_list();
    assert!(model.state().is_loading);

    // View teardown: abort the listener, drop the model.
    listener.abort();
    drop(model);

    // The bus must not panic publishing to a dead subscriber.
    services.events.publish(AppEvent::TasksChanged);
}
