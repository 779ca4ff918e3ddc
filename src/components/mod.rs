pub mod content_type_selector;
pub mod header;
pub mod history_list;
pub mod icons;
pub mod output_display;
pub mod prompt_input;
