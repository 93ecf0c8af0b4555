mod commands;
mod compliance;
mod db;
mod fuel;
mod guidance;
mod models;
mod session;
#[cfg(test)]
mod test_utils;

use db::AppState;
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tauri::Builder::default()
    .plugin(tauri_plugin_opener::init())
    .setup(|app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool });
            app_handle.manage(state);
            println!("Database ready");
          }
          Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Roster
      commands::get_players,
      commands::update_player,
      commands::seed_players,
      // Fuel log + reports
      commands::fuel::get_week_report,
      commands::fuel::add_fuel_log,
      commands::fuel::delete_fuel_log,
      commands::fuel::get_day_labels,
      // UEFA reference
      commands::guidance::get_uefa_guidance,
      // Session
      commands::session::auth_sign_in,
      commands::session::auth_get_status,
      commands::session::auth_refresh_session,
      commands::session::auth_sign_out,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
