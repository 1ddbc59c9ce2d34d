pub mod banks;
pub mod layout;
mod menu;
mod summary;

pub use banks::{format_bank_date, format_bank_item};
pub use layout::{calculate_menu_chunks, calculate_summary_chunks};
pub use menu::{draw_menu, draw_new_bank_prompt};
pub use summary::{draw_import_summary, error_preview_lines};
