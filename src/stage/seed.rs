//! Pre-computed boxes, e.g. from a prediction service.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BoxerError;
use crate::geometry::{Pixel, Rect};

/// A labeled rectangle in image pixel space, as handed to [`Stage::draw_box`](super::Stage::draw_box).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSeed {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxSeed {
    pub fn new(label: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect<Pixel> {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Reads a JSON array of box seeds.
pub fn read_box_seeds(path: &Path) -> Result<Vec<BoxSeed>, BoxerError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| BoxerError::BoxesJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ImageSize, Stage, StageOptions};
    use std::io::Write;

    #[test]
    fn reads_seed_array() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"label": "dog", "x": 10, "y": 10, "width": 20, "height": 10}}]"#
        )
        .expect("write");

        let seeds = read_box_seeds(file.path()).expect("parse");
        assert_eq!(seeds, vec![BoxSeed::new("dog", 10.0, 10.0, 20.0, 10.0)]);
    }

    #[test]
    fn malformed_seeds_report_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"label": "dog"}}"#).expect("write");

        match read_box_seeds(file.path()) {
            Err(BoxerError::BoxesJsonParse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn draw_box_normalizes_seed() {
        let mut stage = Stage::new(StageOptions::default());
        let ticket = stage.request_background("bg.png");
        stage
            .apply_background(ticket, Ok(ImageSize::new(100, 50)))
            .expect("apply");

        let id = stage.draw_box(&BoxSeed::new("dog", 90.0, -5.0, 20.0, 1.0));
        assert_eq!(
            stage.get(id).map(|b| b.rect()),
            Some(Rect::new(90.0, 0.0, 10.0, 3.0))
        );
        assert_eq!(stage.get(id).map(|b| b.label()), Some("dog"));
    }
}
