pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

#[cfg(feature = "desktop")]
use presentation::commands::{
    backup_commands, offline_commands, storage_commands, system_commands,
};
#[cfg(feature = "desktop")]
use state::AppState;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Run the Tauri application
///
/// # Panics
///
/// Panics if the Tauri application fails to run
pub fn run() {
    use presentation::ipc::IpcConnectivityNotifier;
    use shared::AppConfig;
    use std::sync::Arc;
    use tauri::Manager;
    use tracing::info;

    // ログ設定の初期化
    init_logging();

    info!("DairyHub application starting...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            // ストレージ関連コマンド
            storage_commands::storage_save,
            storage_commands::storage_load,
            storage_commands::storage_remove,
            storage_commands::storage_clear,
            storage_commands::storage_export,
            storage_commands::storage_import,
            storage_commands::storage_usage,
            // オフライン関連コマンド
            offline_commands::enqueue_offline_action,
            offline_commands::list_offline_actions,
            offline_commands::drain_offline_actions,
            offline_commands::clear_offline_actions,
            offline_commands::get_sync_status,
            offline_commands::synchronize,
            offline_commands::report_connectivity,
            offline_commands::get_sync_metrics,
            // バックアップ関連コマンド
            backup_commands::export_backup,
            backup_commands::import_backup,
            // システム関連コマンド
            system_commands::get_app_info,
            system_commands::open_external_url,
        ])
        .setup(|app| {
            let app_handle = app.handle().clone();
            let config = AppConfig::from_env();
            let notifier = Arc::new(IpcConnectivityNotifier::new(&app_handle));

            // UI から最初の online/offline 通知が届くまではオンラインとみなす
            let app_state = tauri::async_runtime::block_on(async move {
                let state = AppState::initialize(config, notifier, true).await?;
                state.start_background_tasks().await;
                Ok::<_, shared::AppError>(state)
            })?;

            app_handle.manage(app_state);
            info!("Application setup complete");
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let tauri::RunEvent::Exit = event {
                let state = app_handle.state::<AppState>().inner().clone();
                tauri::async_runtime::block_on(state.shutdown());
            }
        });
}

/// tracing の購読者を初期化する。`RUST_LOG` が未設定なら `dairyhub=debug,info`。
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dairyhub=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
