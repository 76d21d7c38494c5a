//! File browsing handlers.

use std::path::PathBuf;

use iced::Task;

use super::helpers::clean_file_url;
use crate::app::{App, Message};

impl App {
    /// Browse for a format CSV.
    pub fn browse_csv(&self) -> Task<Message> {
        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Format CSV")
                    .add_filter("CSV Files", &["csv"])
                    .add_filter("All Files", &["*"])
                    .pick_file()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::CsvSelected,
        )
    }

    /// Browse for the output directory.
    pub fn browse_output(&self) -> Task<Message> {
        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Output Directory")
                    .pick_folder()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::OutputSelected,
        )
    }

    /// Handle typed or pasted output directory text.
    pub fn handle_output_dir_changed(&mut self, text: String) {
        self.output_dir = if text.trim_start().starts_with("file://") {
            clean_file_url(&text)
        } else {
            text
        };
    }

    /// Handle folder selected from browser.
    pub fn handle_output_selected(&mut self, path: Option<PathBuf>) {
        if let Some(p) = path {
            let path_str = p.to_string_lossy().to_string();
            self.output_dir = path_str.clone();
            self.append_log(&format!("Output directory: {}", path_str));
            self.update_paths(|paths| paths.output_folder = path_str);
        }
    }
}
