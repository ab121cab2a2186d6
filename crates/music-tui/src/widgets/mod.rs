pub mod pane_chrome;
pub mod progress_bar;
pub mod search_input;
pub mod status_bar;
