//! Evenly spaced tracks.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use waygeom::Sign;

/// An unbounded staircase of track coordinates, starting at a fixed location.
///
/// Track `k` lies at `start + sign * k * pitch`.
#[derive(Builder, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformTracks {
    pub start: f64,
    pub pitch: f64,
    #[builder(default = "Sign::Pos")]
    pub sign: Sign,
}

impl UniformTracks {
    #[inline]
    pub fn builder() -> UniformTracksBuilder {
        UniformTracksBuilder::default()
    }

    /// The coordinate of track `index`.
    pub fn index(&self, index: usize) -> f64 {
        self.start + self.sign.as_f64() * index as f64 * self.pitch
    }

    pub fn iter(&self) -> UniformTracksIter {
        UniformTracksIter { idx: 0, ptr: self }
    }
}

pub struct UniformTracksIter<'a> {
    idx: usize,
    ptr: &'a UniformTracks,
}

impl<'a> Iterator for UniformTracksIter<'a> {
    type Item = f64;
    fn next(&mut self) -> Option<Self::Item> {
        let res = self.ptr.index(self.idx);
        self.idx += 1;
        Some(res)
    }
}
