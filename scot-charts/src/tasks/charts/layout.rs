//! Placement of bars along the x axis of a grouped bar chart. All positions
//! are in chart units: one group per thread count, `n` bar slots per group.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BarGrouping {
    /// Bars come in adjacent pairs (one per family) separated by
    /// `pair_spacing`
    Paired { pair_spacing: f64 },
    /// Bars are laid out back to back
    Flat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub bar_width: f64,
    pub group_spacing: f64,
    pub grouping: BarGrouping,
}

impl BarLayout {
    /// Padding between the outermost bars and the edges of the plot.
    const EDGE_PAD: f64 = 0.3;

    /// Offset of the centre of the bar in slot `rank` from the origin of its
    /// group.
    pub fn slot_offset(&self, rank: usize) -> f64 {
        match self.grouping {
            BarGrouping::Paired { pair_spacing } => {
                let pair = (rank / 2) as f64;
                let mut offset = pair * (2.0 * self.bar_width + pair_spacing);
                if rank % 2 == 1 {
                    offset += self.bar_width;
                }
                offset
            }
            BarGrouping::Flat => rank as f64 * self.bar_width,
        }
    }

    /// Distance between the origins of two consecutive groups of `n` bars.
    /// An odd bar out still takes a whole pair slot.
    pub fn group_width(&self, n: usize) -> f64 {
        match self.grouping {
            BarGrouping::Paired { pair_spacing } => {
                n.div_ceil(2) as f64 * (2.0 * self.bar_width + pair_spacing) + self.group_spacing
            }
            BarGrouping::Flat => n as f64 * self.bar_width + self.group_spacing,
        }
    }

    pub fn bar_center(&self, group: usize, rank: usize, n: usize) -> f64 {
        group as f64 * self.group_width(n) + self.slot_offset(rank)
    }

    /// Left and right edge of a bar.
    pub fn bar_span(&self, group: usize, rank: usize, n: usize) -> (f64, f64) {
        let center = self.bar_center(group, rank, n);
        (center - self.bar_width / 2.0, center + self.bar_width / 2.0)
    }

    /// Where the thread-count tick of a group goes: halfway between its first
    /// and last bar.
    pub fn tick_center(&self, group: usize, n: usize) -> f64 {
        let first = self.bar_center(group, 0, n);
        let last = self.bar_center(group, n.saturating_sub(1), n);
        (first + last) / 2.0
    }

    /// Visible x range for `groups` groups of `n` bars.
    pub fn x_range(&self, groups: usize, n: usize) -> Range<f64> {
        let pad = Self::EDGE_PAD * self.bar_width + self.bar_width / 2.0;
        let first = self.bar_center(0, 0, n);
        let last = self.bar_center(groups.saturating_sub(1), n.saturating_sub(1), n);
        (first - pad)..(last + pad)
    }
}
