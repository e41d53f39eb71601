//! Keyframe storage and segment lookup.
//!
//! Model:
//! - A KeyframeSet holds (state, time) pairs sorted ascending by time.
//! - Equal times are allowed; the zero-length segment between them resolves to
//!   the later keyframe at fraction 0.
//! - Lookup is a binary search over keyframe times.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MorphError;

/// Timeline position or duration, in caller-chosen units.
pub type Time = f64;

/// A recorded state paired with its position on the timeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe<T> {
    pub state: T,
    pub time: Time,
}

impl<T> Keyframe<T> {
    pub fn new(state: T, time: Time) -> Self {
        Self { state, time }
    }
}

/// Active segment for a cursor: blend `low` towards `high` by `fraction`.
///
/// `index` is the position of the segment's left keyframe and is what the
/// lookup reports for ordering purposes. For a degenerate segment `low` and
/// `high` both point at the later keyframe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub low: usize,
    pub high: usize,
    pub fraction: f32,
}

/// Ordered, append-only keyframe container.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeSet<T> {
    frames: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeSet<T> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<T> KeyframeSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Append a keyframe. Times must be finite, non-negative and not earlier
    /// than the last keyframe; a rejected keyframe leaves the set untouched.
    pub fn add(&mut self, state: T, time: Time) -> Result<(), MorphError> {
        if !time.is_finite() || time < 0.0 {
            return Err(MorphError::InvalidTime { time });
        }
        if let Some(last) = self.frames.last() {
            if time < last.time {
                return Err(MorphError::OutOfOrderKeyframe {
                    time,
                    previous: last.time,
                });
            }
        }
        self.frames.push(Keyframe { state, time });
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe<T>> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyframe<T>> {
        self.frames.iter()
    }

    pub fn first_time(&self) -> Option<Time> {
        self.frames.first().map(|k| k.time)
    }

    pub fn last_time(&self) -> Option<Time> {
        self.frames.last().map(|k| k.time)
    }

    /// Duration between the first and last keyframe (0 when fewer than two).
    pub fn span(&self) -> Time {
        match (self.first_time(), self.last_time()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Fails unless at least two keyframes are registered.
    pub fn ensure_playable(&self) -> Result<(), MorphError> {
        if self.frames.len() < 2 {
            return Err(MorphError::NotEnoughKeyframes {
                count: self.frames.len(),
            });
        }
        Ok(())
    }

    /// Locate the segment bracketing `cursor` and the local fraction within it.
    ///
    /// Edge cases:
    /// - cursor before the first keyframe: first segment at fraction 0.
    /// - cursor at or past the last keyframe: last segment at fraction 1.
    /// - zero-length segment: later keyframe at fraction 0.
    pub fn find_segment(&self, cursor: Time) -> Result<Segment, MorphError> {
        self.ensure_playable()?;
        let n = self.frames.len();

        let first = self.frames[0].time;
        let cursor = if cursor.is_nan() || cursor < first {
            first
        } else {
            cursor
        };
        if cursor >= self.frames[n - 1].time {
            return Ok(self.segment_at(n - 2, self.frames[n - 1].time));
        }

        // first <= cursor < last, so the first key strictly after cursor sits in 1..n.
        let next = self.frames.partition_point(|k| k.time <= cursor);
        Ok(self.segment_at(next - 1, cursor))
    }

    fn segment_at(&self, low: usize, cursor: Time) -> Segment {
        let high = low + 1;
        let t0 = self.frames[low].time;
        let t1 = self.frames[high].time;
        let len = t1 - t0;
        if len <= 0.0 {
            return Segment {
                index: low,
                low: high,
                high,
                fraction: 0.0,
            };
        }
        let fraction = ((cursor - t0) / len).clamp(0.0, 1.0) as f32;
        Segment {
            index: low,
            low,
            high,
            fraction,
        }
    }

    /// States of the segment endpoints.
    pub(crate) fn endpoints(&self, segment: &Segment) -> (&T, &T) {
        (
            &self.frames[segment.low].state,
            &self.frames[segment.high].state,
        )
    }
}

impl<T> TryFrom<Vec<Keyframe<T>>> for KeyframeSet<T> {
    type Error = MorphError;

    fn try_from(frames: Vec<Keyframe<T>>) -> Result<Self, Self::Error> {
        let mut set = KeyframeSet::with_capacity(frames.len());
        for frame in frames {
            set.add(frame.state, frame.time)?;
        }
        Ok(set)
    }
}

impl<T: Serialize> Serialize for KeyframeSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.frames.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for KeyframeSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let frames = Vec::<Keyframe<T>>::deserialize(deserializer)?;
        KeyframeSet::try_from(frames).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(times: &[Time]) -> KeyframeSet<usize> {
        let mut s = KeyframeSet::new();
        for (i, t) in times.iter().enumerate() {
            s.add(i, *t).unwrap();
        }
        s
    }

    #[test]
    fn interior_cursor_resolves_fraction() {
        let s = set(&[0.0, 10.0, 30.0]);
        let seg = s.find_segment(20.0).unwrap();
        assert_eq!((seg.low, seg.high), (1, 2));
        assert!((seg.fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn cursor_on_interior_key_starts_next_segment() {
        let s = set(&[0.0, 10.0, 30.0]);
        let seg = s.find_segment(10.0).unwrap();
        assert_eq!((seg.low, seg.high, seg.fraction), (1, 2, 0.0));
    }

    #[test]
    fn cursor_before_first_clamps() {
        let s = set(&[5.0, 10.0]);
        let seg = s.find_segment(1.0).unwrap();
        assert_eq!((seg.low, seg.high, seg.fraction), (0, 1, 0.0));
    }

    #[test]
    fn cursor_past_last_clamps() {
        let s = set(&[0.0, 10.0, 20.0]);
        let seg = s.find_segment(99.0).unwrap();
        assert_eq!((seg.low, seg.high, seg.fraction), (1, 2, 1.0));
    }

    #[test]
    fn coincident_keys_pick_later_without_division() {
        let s = set(&[4.0, 4.0]);
        let seg = s.find_segment(4.0).unwrap();
        assert_eq!((seg.low, seg.high, seg.fraction), (1, 1, 0.0));
    }

    #[test]
    fn duplicate_interior_time_lands_on_later_key() {
        let s = set(&[0.0, 5.0, 5.0, 10.0]);
        let seg = s.find_segment(5.0).unwrap();
        assert_eq!((seg.low, seg.high, seg.fraction), (2, 3, 0.0));
    }

    #[test]
    fn stacked_keys_at_start_pick_last_of_stack() {
        let s = set(&[0.0, 0.0, 0.0, 10.0]);
        let seg = s.find_segment(0.0).unwrap();
        assert_eq!((seg.low, seg.high, seg.fraction), (2, 3, 0.0));
    }

    #[test]
    fn cursor_before_stacked_start_matches_cursor_on_it() {
        let s = set(&[2.0, 2.0, 2.0, 10.0]);
        let on = s.find_segment(2.0).unwrap();
        assert_eq!(s.find_segment(0.5).unwrap(), on);
        assert_eq!(s.find_segment(f64::NAN).unwrap(), on);
        assert_eq!((on.low, on.high, on.fraction), (2, 3, 0.0));
    }

    #[test]
    fn needs_two_keys() {
        let s = set(&[1.0]);
        assert_eq!(
            s.find_segment(0.0),
            Err(MorphError::NotEnoughKeyframes { count: 1 })
        );
    }

    #[test]
    fn rejects_out_of_order_and_invalid_times() {
        let mut s = set(&[0.0, 10.0]);
        assert_eq!(
            s.add(2, 5.0),
            Err(MorphError::OutOfOrderKeyframe {
                time: 5.0,
                previous: 10.0
            })
        );
        assert!(matches!(
            s.add(2, f64::NAN),
            Err(MorphError::InvalidTime { .. })
        ));
        assert_eq!(s.add(2, -1.0), Err(MorphError::InvalidTime { time: -1.0 }));
        assert_eq!(s.len(), 2);
        assert_eq!(s.span(), 10.0);
    }

    #[test]
    fn deserialize_validates_order() {
        let ok: KeyframeSet<f32> =
            serde_json::from_str(r#"[{"state":0.0,"time":0},{"state":1.0,"time":2}]"#).unwrap();
        assert_eq!(ok.len(), 2);
        let bad = serde_json::from_str::<KeyframeSet<f32>>(
            r#"[{"state":0.0,"time":3},{"state":1.0,"time":2}]"#,
        );
        assert!(bad.is_err());
    }
}
