//! Command implementations for the timestats CLI.

mod capture;

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use timestats_core::{GlobalStats, GlobalStatsProto};

use crate::DumpFormat;
use capture::Capture;

/// Dump command: replay a capture and write it in the requested format.
pub fn dump(capture_path: &Path, format: DumpFormat, output: Option<&Path>) -> Result<()> {
    let capture = Capture::from_path(capture_path)?;
    let mut stats = GlobalStats::new();
    capture.replay(&mut stats);

    let rendered = render(&stats, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write dump to {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = rendered.len(), "wrote dump");
        }
        None => {
            if format == DumpFormat::Binary {
                bail!("Binary dumps must be written to a file; pass --output <path>");
            }
            std::io::stdout()
                .write_all(&rendered)
                .context("Failed to write dump to stdout")?;
        }
    }
    Ok(())
}

/// Inspect command: decode a binary dump and print it as JSON.
pub fn inspect(path: &Path) -> Result<()> {
    let proto = read_binary_dump(path)?;
    println!("{}", proto.to_json()?);
    Ok(())
}

/// Render stats in the given format.
pub fn render(stats: &GlobalStats, format: DumpFormat) -> Result<Vec<u8>> {
    Ok(match format {
        DumpFormat::Text => stats.to_string().into_bytes(),
        DumpFormat::Json => stats.to_proto().to_json()?.into_bytes(),
        DumpFormat::Binary => stats.to_proto().to_bytes()?,
    })
}

fn read_binary_dump(path: &Path) -> Result<GlobalStatsProto> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read dump {}", path.display()))?;
    GlobalStatsProto::from_bytes(&bytes)
        .with_context(|| format!("Failed to decode dump {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::capture::LayerCapture;
    use super::*;
    use indexmap::IndexMap;
    use timestats_core::PRESENT_TO_PRESENT;

    fn write_capture(dir: &Path) -> std::path::PathBuf {
        let capture = Capture {
            stats_start: 10,
            stats_end: 20,
            total_frames: 3,
            layers: vec![LayerCapture {
                layer_name: "com.example.app/MainActivity#0".to_string(),
                total_frames: 3,
                deltas: IndexMap::from([(PRESENT_TO_PRESENT.to_string(), vec![16, 16, 33])]),
                ..LayerCapture::default()
            }],
            ..Capture::default()
        };
        let path = dir.join("capture.json");
        std::fs::write(&path, serde_json::to_string(&capture).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_text_render_reports_fps() {
        let mut stats = GlobalStats::new();
        let layer = stats.layer_mut("com.example.app/MainActivity#0");
        for delta in [16, 16, 33] {
            layer.insert(PRESENT_TO_PRESENT, delta);
        }

        let text = String::from_utf8(render(&stats, DumpFormat::Text).unwrap()).unwrap();
        assert!(text.starts_with("SurfaceFlinger TimeStats:\n"));
        assert!(text.contains("packageName = com.example.app\n"));
        assert!(text.contains("averageFPS = 46.154\n"));
    }

    #[test]
    fn test_json_render_matches_proto() {
        let mut stats = GlobalStats::new();
        stats.layer_mut("StatusBar#0").insert("post2present", 7);

        let json = String::from_utf8(render(&stats, DumpFormat::Json).unwrap()).unwrap();
        assert_eq!(GlobalStatsProto::from_json(&json).unwrap(), stats.to_proto());
    }

    #[test]
    fn test_binary_dump_to_file_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let capture = write_capture(dir.path());
        let output = dir.path().join("dump.bin");

        dump(&capture, DumpFormat::Binary, Some(&output)).unwrap();

        let proto = read_binary_dump(&output).unwrap();
        assert_eq!(proto.stats_start, 10);
        assert_eq!(proto.stats_end, 20);
        assert_eq!(proto.stats.len(), 1);
        assert_eq!(proto.stats[0].package_name, "com.example.app");
        assert_eq!(proto.stats[0].deltas[0].histograms.len(), 2);
    }

    #[test]
    fn test_binary_dump_to_stdout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let capture = write_capture(dir.path());
        assert!(dump(&capture, DumpFormat::Binary, None).is_err());
    }

    #[test]
    fn test_missing_capture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = dump(&dir.path().join("absent.json"), DumpFormat::Text, None).unwrap_err();
        assert!(err.to_string().contains("Failed to read capture"));
    }
}
