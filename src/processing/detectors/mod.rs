pub mod event;

// DETECTION OUTPUT ------------------------------------------------------------

/// Metadata key attached to the output stream for each detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Peak,
    Rms,
    Mjd,
}

impl TagKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKey::Peak => "PEAK",
            TagKey::Rms => "RMS",
            TagKey::Mjd => "MJD",
        }
    }
}

/// One key/value pair on the output stream, at the offset (in vectors) of
/// the output item it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamTag {
    pub offset: u64,
    pub key: TagKey,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRecord {
    /// Peak amplitude, `sqrt` of the sample power that crossed the threshold.
    pub peak: f64,
    pub rms: f64,
    /// Wall-clock time of detection as a Modified Julian Day.
    pub mjd: f64,
}

/// What the snapshot extractor did with a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The capture buffer now holds the window centred on the peak.
    Captured,
    /// The window would leave the ring's valid samples; the capture buffer
    /// keeps its previous contents.
    SkippedNearBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Output item (vector) offset the metadata is attached to.
    pub offset: u64,
    pub record: DetectionRecord,
    pub capture: CaptureOutcome,
}

impl Detection {
    pub fn tags(&self) -> [StreamTag; 3] {
        let tag = |key, value| StreamTag {
            offset: self.offset,
            key,
            value,
        };
        [
            tag(TagKey::Peak, self.record.peak),
            tag(TagKey::Rms, self.record.rms),
            tag(TagKey::Mjd, self.record.mjd),
        ]
    }
}

// LATCH COMPONENT -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// The first traversal has not closed; nothing can be judged yet.
    Priming,
    /// Searching for the first sample above threshold in this traversal.
    Armed,
    /// A detection fired; waiting for the next traversal to close.
    Latched,
}

impl LatchState {
    pub fn rearm(&mut self) {
        *self = LatchState::Armed;
    }

    pub fn latch(&mut self) {
        *self = LatchState::Latched;
    }

    pub fn is_armed(&self) -> bool {
        *self == LatchState::Armed
    }
}
