pub mod database;
pub mod ui_cache;

pub use database::{
    clear_completed, delete_task, get_connection, init_database, insert_task, load_all_tasks,
    set_completed, update_task,
};
pub use ui_cache::UiCache;
