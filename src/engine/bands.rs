// src/engine/bands.rs
//! Spectral aggregation: reduce a raw frequency frame to band volumes.

/// Summed volumes for one frequency frame: the full range, the lower
/// half of the bins, and the upper half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandVolumes {
    pub total: f32,
    pub low: f32,
    pub high: f32,
}

impl BandVolumes {
    /// Sum a frame into band volumes. Bins are 0-255, so the sums fit
    /// an f32 exactly.
    pub fn of(frame: &[u8]) -> Self {
        let half = frame.len() / 2;
        let low: f32 = frame[..half].iter().map(|&v| f32::from(v)).sum();
        let high: f32 = frame[half..].iter().map(|&v| f32::from(v)).sum();
        Self {
            total: low + high,
            low,
            high,
        }
    }
}

/// Band volumes for the current frame plus the low-band movement since
/// the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandFrame {
    pub current: BandVolumes,
    pub previous: BandVolumes,
    /// `current.low - previous.low`; what the onset detector watches.
    pub delta_low: f32,
}

/// Reduces each raw frame to [`BandFrame`]s, retaining its own copy of
/// the previous frame for the delta. Before the first frame the
/// baseline is all zeros.
pub struct BandAggregator {
    prev: Vec<u8>,
}

impl BandAggregator {
    pub fn new(bin_count: usize) -> Self {
        Self {
            prev: vec![0; bin_count],
        }
    }

    /// Aggregate one frame. The caller guarantees `frame` has the length
    /// this aggregator was created with.
    pub fn aggregate(&mut self, frame: &[u8]) -> BandFrame {
        let current = BandVolumes::of(frame);
        let previous = BandVolumes::of(&self.prev);
        self.prev.copy_from_slice(frame);
        BandFrame {
            current,
            previous,
            delta_low: current.low - previous.low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_split_at_the_half_bin() {
        let v = BandVolumes::of(&[10, 20, 30, 40]);
        assert_eq!(v.low, 30.0);
        assert_eq!(v.high, 70.0);
        assert_eq!(v.total, 100.0);
    }

    #[test]
    fn first_frame_baseline_is_zero() {
        let mut agg = BandAggregator::new(4);
        let frame = agg.aggregate(&[100, 100, 0, 0]);
        assert_eq!(frame.previous.total, 0.0);
        assert_eq!(frame.delta_low, 200.0);
    }

    #[test]
    fn delta_tracks_low_band_only() {
        let mut agg = BandAggregator::new(4);
        agg.aggregate(&[50, 50, 0, 0]);
        // Low band unchanged, high band jumps: delta must stay zero.
        let frame = agg.aggregate(&[50, 50, 255, 255]);
        assert_eq!(frame.delta_low, 0.0);
        let frame = agg.aggregate(&[0, 0, 255, 255]);
        assert_eq!(frame.delta_low, -100.0);
    }
}
