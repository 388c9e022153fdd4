pub mod entry_form;
pub mod entry_list;
