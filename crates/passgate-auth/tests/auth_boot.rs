use chrono::Duration;
use passgate_auth::services::{AuthSettings, AuthSettingsError, TokenKind, TokenSettingsError};
use std::{env, sync::Once};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

const CONFIG_ROOT: &str = "./tests/configs";

#[test]
fn boot_with_empty_auth_section_applies_the_built_in_policy() {
    init_logging();

    log::info!("Booting from the test stage config...");
    let settings = AuthSettings::load("test", Some(format!("{CONFIG_ROOT}/server_config.test.json").into())).unwrap();

    assert_eq!(settings.token.ttl(TokenKind::Access), Duration::days(15));
    assert_eq!(settings.token.ttl(TokenKind::Refresh), Duration::days(30));
    assert_eq!(settings.token.ttl(TokenKind::PersonalAccess), Duration::days(180));

    assert_eq!(settings.scopes.names(), vec!["read", "write"]);
    assert_eq!(settings.scopes.description("read"), Some("Read user information"));
    assert_eq!(settings.scopes.description("write"), Some("Modify user information"));
    assert!(settings.scopes.default_scopes().contains("read"));
    assert_eq!(settings.scopes.default_scopes().len(), 1);
}

#[test]
fn boot_with_overrides_layers_file_and_environment() {
    init_logging();
    env::set_var("PASSGATE--AUTH--SCOPES--ADMIN", "Administer everything");

    log::info!("Booting from the overrides stage config...");
    let settings =
        AuthSettings::load("overrides", Some(format!("{CONFIG_ROOT}/server_config.overrides.json").into())).unwrap();

    // from the file layer
    assert_eq!(settings.token.ttl(TokenKind::Access), Duration::hours(1));
    // untouched fields keep the built-in policy
    assert_eq!(settings.token.ttl(TokenKind::Refresh), Duration::days(30));

    assert_eq!(settings.scopes.names(), vec!["admin", "read", "write"]);
    // the environment layer wins over the file layer
    assert_eq!(settings.scopes.description("admin"), Some("Administer everything"));

    let granted = settings.scopes.grant(&[]).unwrap();
    assert!(granted.has("read"));
    assert!(granted.has("write"));
    assert!(!granted.has("admin"));
}

#[test]
fn boot_rejects_a_zero_lifetime() {
    init_logging();

    let err = AuthSettings::load("zero_ttl", Some(format!("{CONFIG_ROOT}/server_config.zero_ttl.json").into()))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AuthSettingsError>(),
        Some(AuthSettingsError::TokenSettings(TokenSettingsError::InvalidTtl(TokenKind::Access)))
    ));
}

#[test]
fn boot_rejects_an_unregistered_default_scope() {
    init_logging();

    let err = AuthSettings::load(
        "bad_default",
        Some(format!("{CONFIG_ROOT}/server_config.bad_default.json").into()),
    )
    .unwrap_err();
    let err = err.to_string();
    assert!(err.contains("admin"), "unexpected error: {err}");
}
