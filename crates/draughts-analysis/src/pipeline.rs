//! Decoder-independent drivers for video and static analysis.

use crate::core::{BoardState, Color, RgbImage};
use crate::eval::{evaluate_moves, BoardTruth, ConfusionSummary, KingConfusion, ManConfusion};
use crate::io::{AnalysisConfig, StaticImageResult, StaticReport, VideoReport};
use crate::rectify::{canonical_frame, BoardRectifier};
use crate::source::{FramePacer, FrameSource};
use crate::tracker::{AnalysisSession, FrameOutcome, GeometricValidator};
use crate::vision::{FrameObserver, ObservationDetail};
use crate::AnalysisError;
use std::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Feed every frame of `source` through `observer` into `session`.
///
/// Frames are numbered from 0 in arrival order. Returns the number of
/// frames read.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn track_frames<S: FrameSource + ?Sized>(
    source: &mut S,
    observer: &FrameObserver,
    rectifier: Option<&BoardRectifier>,
    session: &mut AnalysisSession,
    mut pacer: Option<&mut FramePacer>,
) -> Result<u64, AnalysisError> {
    let mut frame = 0u64;
    while let Some(img) = source.next_frame()? {
        let canonical = canonical_frame(rectifier, img);
        let observation = observer.observe(&canonical.view())?;
        if let FrameOutcome::Processed { moves, .. } = session.process_frame(frame, &observation) {
            for m in &moves {
                log::debug!("frame {}: move {}", frame, m);
            }
        }
        if let Some(p) = pacer.as_deref_mut() {
            p.wait();
        }
        frame += 1;
    }
    Ok(frame)
}

/// Run a full video analysis over `source` and evaluate it against the
/// configured ground truth.
///
/// A frame that fails mid-stream ends the run; the report keeps what was
/// tracked so far and carries the error.
pub fn analyze_video<S: FrameSource + ?Sized>(
    cfg: &AnalysisConfig,
    observer: &FrameObserver,
    rectifier: Option<&BoardRectifier>,
    source: &mut S,
) -> Result<VideoReport, AnalysisError> {
    let truth = cfg.ground_truth()?;
    let mut session = AnalysisSession::new(cfg.tracker.clone(), cfg.geometry);
    let mut pacer = cfg.playback_fps.and_then(FramePacer::new);
    if let (Some(fps), None) = (cfg.playback_fps, &pacer) {
        log::warn!("ignoring playback rate {} fps; frames are not throttled", fps);
    }

    let result = track_frames(source, observer, rectifier, &mut session, pacer.as_mut());
    let mut report = VideoReport::from_session(cfg, &session);
    if let Err(err) = result {
        log::warn!("video analysis stopped early: {}", err);
        report.set_error(&err);
    }

    let evaluation = evaluate_moves(&truth.moves, session.moves(), cfg.match_window);
    log::info!(
        "{} moves recorded, {} of {} ground-truth moves missed",
        evaluation.recorded,
        evaluation.missed_count(),
        truth.moves.len()
    );
    report.evaluation = Some(evaluation);
    Ok(report)
}

/// Confusion matrix matching the classifier mode.
#[derive(Clone, Debug)]
pub enum StaticConfusion {
    Man(ManConfusion),
    King(KingConfusion),
}

impl StaticConfusion {
    pub fn new(king_aware: bool) -> Self {
        if king_aware {
            StaticConfusion::King(KingConfusion::king_aware())
        } else {
            StaticConfusion::Man(ManConfusion::man_only())
        }
    }

    pub fn record_board(&mut self, detected: &BoardState, truth: &BoardState) {
        match self {
            StaticConfusion::Man(m) => m.record_board(detected, truth),
            StaticConfusion::King(m) => m.record_board(detected, truth),
        }
    }

    pub fn summary(&self) -> ConfusionSummary {
        match self {
            StaticConfusion::Man(m) => m.summary(),
            StaticConfusion::King(m) => m.summary(),
        }
    }
}

impl fmt::Display for StaticConfusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticConfusion::Man(m) => fmt::Display::fmt(m, f),
            StaticConfusion::King(m) => fmt::Display::fmt(m, f),
        }
    }
}

/// Classifies photographed positions one by one against their ground truth.
#[derive(Debug)]
pub struct StaticEvaluator<'a> {
    observer: &'a FrameObserver,
    rectifier: Option<&'a BoardRectifier>,
    validator: GeometricValidator,
    confusion: StaticConfusion,
    last: Option<BoardState>,
    images: Vec<StaticImageResult>,
    missing: Vec<String>,
}

impl<'a> StaticEvaluator<'a> {
    pub fn new(observer: &'a FrameObserver, rectifier: Option<&'a BoardRectifier>) -> Self {
        let king_aware = observer.classifier().params().king_aware;
        Self {
            observer,
            rectifier,
            validator: GeometricValidator::new(),
            confusion: StaticConfusion::new(king_aware),
            last: None,
            images: Vec::new(),
            missing: Vec::new(),
        }
    }

    #[inline]
    pub fn king_aware(&self) -> bool {
        self.observer.classifier().params().king_aware
    }

    pub fn confusion(&self) -> &StaticConfusion {
        &self.confusion
    }

    pub fn images(&self) -> &[StaticImageResult] {
        &self.images
    }

    /// Classify one camera image of the position described by `truth`.
    pub fn evaluate(
        &mut self,
        truth: &BoardTruth,
        image: RgbImage,
    ) -> Result<ObservationDetail, AnalysisError> {
        let expected = truth.board()?;
        let canonical = canonical_frame(self.rectifier, image);
        let detail = self.observer.observe_detailed(&canonical.view())?;
        let detected = detail.observation.board;
        self.confusion.record_board(&detected, &expected);

        let king_aware = self.king_aware();
        let errors = detected
            .iter()
            .filter(|&(s, o)| !o.same_piece(expected.get(s), king_aware))
            .count();
        let inferred_move = self
            .last
            .as_ref()
            .and_then(|before| self.validator.infer_move(before, &detected))
            .map(Into::into);
        log::debug!("{}: {} squares misclassified", truth.file, errors);

        self.images.push(StaticImageResult {
            file: truth.file.clone(),
            detected_white: detected.piece_list(Color::White),
            detected_black: detected.piece_list(Color::Black),
            errors,
            inferred_move,
        });
        self.last = Some(detected);
        Ok(detail)
    }

    /// Note an image that could not be read. No move is inferred across the gap.
    pub fn skip(&mut self, truth: &BoardTruth) {
        self.missing.push(truth.file.clone());
        self.last = None;
    }

    pub fn finish(self, static_dir: Option<String>) -> StaticReport {
        let king_aware = self.king_aware();
        StaticReport {
            static_dir,
            king_aware,
            images: self.images,
            missing: self.missing,
            confusion: self.confusion.summary(),
            error: None,
        }
    }
}
