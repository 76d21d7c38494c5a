//! CSV loading handlers.

use std::path::PathBuf;

use tmg_core::media::{preview_file_names, FormatTable};

use super::helpers::is_csv_path;
use crate::app::{App, LoadedCsv, Phase};

impl App {
    /// Load a dropped or selected CSV and preview its file names.
    ///
    /// A rejected file leaves the previously loaded table (if any) in place.
    pub fn handle_csv_path(&mut self, path: PathBuf) {
        if self.phase == Phase::Processing {
            self.append_log("Ignoring CSV while processing");
            return;
        }

        if !is_csv_path(&path) {
            self.show_error(format!("Please drop a CSV file (got {})", path.display()));
            return;
        }

        let loaded = FormatTable::from_path(&path).and_then(|table| {
            let preview = preview_file_names(&table)?;
            Ok(LoadedCsv {
                path: path.clone(),
                table,
                preview,
            })
        });

        match loaded {
            Ok(csv) => {
                let count = csv.preview.len();
                self.csv = Some(csv);
                self.phase = Phase::CsvLoaded;
                self.notice = None;
                self.progress = (0, count);
                self.status_text = "CSV file loaded successfully!".to_string();
                self.append_log(&format!("Loaded {} ({} rows)", path.display(), count));

                let stored = path.to_string_lossy().to_string();
                self.update_paths(|paths| paths.last_csv_path = stored);
            }
            Err(e) => {
                self.show_error(format!("Error reading {}: {}", path.display(), e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app, has_error};
    use crate::app::Message;
    use std::fs;

    const CSV: &str = "Resolution,Content Type,Duration\n1280x720,Video,5\n640x480,Static,0\n";

    #[test]
    fn non_csv_drop_is_rejected_and_stays_idle() {
        let (mut app, dir) = app();
        let path = dir.path().join("formats.txt");
        fs::write(&path, CSV).unwrap();

        let _ = app.update(Message::FileDropped(path));

        assert_eq!(app.phase, Phase::Idle);
        assert!(app.csv.is_none());
        assert!(has_error(&app));
    }

    #[test]
    fn valid_csv_moves_to_loaded_with_preview() {
        let (mut app, dir) = app();
        let path = dir.path().join("formats.csv");
        fs::write(&path, CSV).unwrap();

        let _ = app.update(Message::FileDropped(path.clone()));

        assert_eq!(app.phase, Phase::CsvLoaded);
        assert!(app.can_start());
        let csv = app.csv.as_ref().unwrap();
        assert_eq!(csv.preview, ["1280x720_video_5.mp4", "640x480_static_0.jpg"]);
        assert_eq!(app.progress, (0, 2));
        assert_eq!(
            app.settings().paths.last_csv_path,
            path.to_string_lossy().to_string()
        );
    }

    #[test]
    fn malformed_csv_keeps_previous_table() {
        let (mut app, dir) = app();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        fs::write(&good, CSV).unwrap();
        fs::write(&bad, "Resolution,Duration\n640x480,0\n").unwrap();

        let _ = app.update(Message::FileDropped(good.clone()));
        let _ = app.update(Message::CsvSelected(Some(bad)));

        assert_eq!(app.phase, Phase::CsvLoaded);
        assert_eq!(app.csv.as_ref().unwrap().path, good);
        assert!(has_error(&app));
    }

    #[test]
    fn cancelled_picker_changes_nothing() {
        let (mut app, _dir) = app();
        let _ = app.update(Message::CsvSelected(None));
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.notice.is_none());
    }
}
