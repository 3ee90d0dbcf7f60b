use std::time::Duration;

use paperkit::storage::{ConnectionManager, MySqlConnectionManager, MySqlSettings};

fn unreachable_settings() -> MySqlSettings {
    MySqlSettings {
        hostname: "127.0.0.1".to_string(),
        port: 1,
        database: "spigot".to_string(),
        user_id: "root".to_string(),
        password: "password".to_string(),
        flags: Vec::new(),
    }
}

#[tokio::test]
async fn test_failed_connection_yields_none() {
    let manager = MySqlConnectionManager::new(unreachable_settings());
    assert!(manager.connect().await.is_none());
}

#[tokio::test]
async fn test_failed_connection_reports_url() {
    let manager = MySqlConnectionManager::new(unreachable_settings());
    let err = manager.try_connect().await.unwrap_err();

    assert!(err.is_storage_error());
    assert!(err.to_string().contains("jdbc:mysql://127.0.0.1:1/spigot"));
}

#[test]
fn test_manager_snapshots_settings() {
    let manager = MySqlConnectionManager::new(unreachable_settings());
    assert_eq!(manager.settings(), &unreachable_settings());
}

#[tokio::test]
async fn test_slow_connection_times_out() {
    // A non-routable address keeps the attempt pending until the timeout
    let settings = MySqlSettings {
        hostname: "10.255.255.1".to_string(),
        ..unreachable_settings()
    };
    let manager =
        MySqlConnectionManager::new(settings).with_connect_timeout(Duration::from_millis(50));

    let err = manager.try_connect().await.unwrap_err();
    assert!(err.is_storage_error());
}
