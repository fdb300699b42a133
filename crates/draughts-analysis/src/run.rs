//! End-to-end runs over media on disk.

use crate::io::{AnalysisConfig, StaticReport, VideoReport};
use crate::media::{load_rgb, save_gray, save_rgb, ImageSequence};
use crate::pipeline::{analyze_video, StaticEvaluator};
use crate::rectify::{canonical_frame, BoardRectifier};
use crate::vision::FrameObserver;
use crate::AnalysisError;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Rectifier and observer for the configured corners and background image.
pub fn build_observer(
    cfg: &AnalysisConfig,
) -> Result<(FrameObserver, Option<BoardRectifier>), AnalysisError> {
    let background_path = cfg
        .background_path
        .as_ref()
        .ok_or(AnalysisError::MissingInput {
            what: "background image",
        })?;
    let rectifier = cfg
        .corners
        .as_ref()
        .map(|c| BoardRectifier::new(c, cfg.geometry))
        .transpose()?;
    let background = canonical_frame(rectifier.as_ref(), load_rgb(background_path)?);
    let observer = FrameObserver::new(
        background,
        cfg.segment.clone(),
        cfg.classifier.clone(),
        cfg.geometry,
    )?;
    Ok((observer, rectifier))
}

/// Track moves over the frames in `cfg.frames_dir`.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn run_video(cfg: &AnalysisConfig) -> Result<VideoReport, AnalysisError> {
    let frames_dir = cfg.frames_dir.as_ref().ok_or(AnalysisError::MissingInput {
        what: "frames directory",
    })?;
    let (observer, rectifier) = build_observer(cfg)?;
    let mut frames = ImageSequence::open(frames_dir)?;
    analyze_video(cfg, &observer, rectifier.as_ref(), &mut frames)
}

/// Classify every ground-truth photograph found in `cfg.static_dir`.
///
/// Unreadable photographs are logged and listed in the report; the run
/// carries on with the rest.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn run_static(cfg: &AnalysisConfig) -> Result<StaticReport, AnalysisError> {
    let static_dir = cfg.static_dir.as_ref().ok_or(AnalysisError::MissingInput {
        what: "static image directory",
    })?;
    let truth = cfg.ground_truth()?;
    let (observer, rectifier) = build_observer(cfg)?;
    let dump_dir = cfg.dump_dir.as_ref().map(Path::new);
    if let Some(dir) = dump_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut evaluator = StaticEvaluator::new(&observer, rectifier.as_ref());
    for board in &truth.boards {
        let path = Path::new(static_dir).join(&board.file);
        let image = match load_rgb(&path) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("{}", err);
                evaluator.skip(board);
                continue;
            }
        };
        let detail = evaluator.evaluate(board, image)?;
        if let Some(dir) = dump_dir {
            let stem = Path::new(&board.file)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| board.file.clone());
            save_rgb(dir.join(format!("{stem}_pieces.png")), &detail.pieces)?;
            save_gray(dir.join(format!("{stem}_mask.png")), &detail.mask)?;
        }
    }

    let report = evaluator.finish(cfg.static_dir.clone());
    log::info!(
        "{} images classified, {} missing, accuracy {:.4}",
        report.images.len(),
        report.missing.len(),
        report.confusion.accuracy
    );
    Ok(report)
}
