// ==========================================
// PIAR Portal - desktop entry point
// ==========================================
// Stack: Tauri + Rust
// ==========================================

// No console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use anyhow::Context;
use piar_portal::app::{AppState, Collaborators};
use piar_portal::config::ConfigManager;
use piar_portal::seed;

fn init_logging() {
    match std::env::var("PIAR_LOG_FORMAT").as_deref() {
        Ok("json") => piar_portal::logging::init_json(),
        _ => piar_portal::logging::init(),
    }
}

/// Config, locale, collaborators and the demo dataset.
async fn build_state() -> anyhow::Result<AppState> {
    let config = Arc::new(ConfigManager::load().context("cannot load configuration")?);
    let current = config.current()?;
    piar_portal::i18n::set_locale(&current.locale);

    let collaborators =
        Collaborators::from_config(&config).map_err(|e| anyhow::anyhow!("{}", e))?;
    let data = seed::demo_dataset();
    seed::register_accounts(collaborators.auth.as_ref(), &data.users)
        .await
        .context("cannot register demo accounts")?;

    Ok(AppState::new(config, collaborators, data.users, data.students))
}

#[cfg(feature = "tauri-app")]
fn main() -> anyhow::Result<()> {
    use piar_portal::app::tauri_commands::*;

    init_logging();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", piar_portal::APP_NAME, piar_portal::VERSION);
    tracing::info!("==================================================");

    let app_state = tauri::async_runtime::block_on(build_state())?;
    tracing::info!("AppState ready, starting Tauri");

    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // Session / navigation
            // ==========================================
            login,
            register,
            reset_password,
            logout,
            get_current_user,
            get_tabs,
            select_tab,
            is_busy,

            // ==========================================
            // Students
            // ==========================================
            list_students,
            select_student,
            get_selected_student,
            create_student,
            update_student,
            assign_teacher,
            add_progress,
            add_document,
            delete_document,
            upload_document,
            get_dashboard_summary,

            // ==========================================
            // PIAR / strategies
            // ==========================================
            generate_plan,
            suggest_strategies,
            assign_strategy,

            // ==========================================
            // Users
            // ==========================================
            list_users,
            list_teachers,
            create_user,
            delete_user,

            // ==========================================
            // Assistant
            // ==========================================
            ask_assistant,
            get_conversation,
            clear_conversation,
        ])
        .run(tauri::generate_context!())
        .context("Tauri application failed")?;

    tracing::info!("Tauri application exited");
    Ok(())
}

#[cfg(not(feature = "tauri-app"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let state = build_state().await?;
    let students = state.students.list()?;
    let users = state.users.list()?;

    println!("==================================================");
    println!("{} v{}", piar_portal::APP_NAME, piar_portal::VERSION);
    println!("==================================================");
    println!("{} users, {} students loaded (demo data)", users.items.len(), students.items.len());
    println!();
    println!("The desktop shell needs the tauri-app feature:");
    println!("  cargo run --features tauri-app");
    Ok(())
}
