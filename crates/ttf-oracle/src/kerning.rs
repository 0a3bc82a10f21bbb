use ttf_parser::{
    gpos::{PairAdjustment, PositioningSubtable},
    kern, Face, GlyphId,
};

/// Pair kerning of a face, in font units
pub struct KerningInfo<'a> {
    pair_adjustments: Vec<PairAdjustment<'a>>,
    kern_subtables: Vec<kern::Subtable<'a>>,
}

impl<'a> KerningInfo<'a> {
    pub fn new(face: &Face<'a>) -> Self {
        Self {
            pair_adjustments: face
                .tables()
                .gpos
                .map(|gpos| {
                    gpos.lookups
                        .into_iter()
                        .flat_map(|lookup| {
                            lookup
                                .subtables
                                .into_iter::<PositioningSubtable>()
                                .filter_map(|subtable| match subtable {
                                    PositioningSubtable::Pair(pair) => Some(pair),
                                    _ => None,
                                })
                        })
                        .collect()
                })
                .unwrap_or_default(),
            kern_subtables: face
                .tables()
                .kern
                .map(|kern| {
                    kern.subtables
                        .into_iter()
                        .filter(|st| st.horizontal && !st.variable && !st.has_cross_stream)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Whether the face has any pair kerning at all
    pub fn is_empty(&self) -> bool {
        self.pair_adjustments.is_empty() && self.kern_subtables.is_empty()
    }

    /// Horizontal adjustment between `first` and `second`
    ///
    /// GPOS takes precedence, the legacy `kern` table is only consulted
    /// if no pair adjustment covers `first`.
    pub fn find(&self, first: GlyphId, second: GlyphId) -> Option<i16> {
        for p in &self.pair_adjustments {
            if let Some(c) = p.coverage().get(first) {
                let records = match p {
                    PairAdjustment::Format1 { coverage: _, sets } => {
                        sets.get(c).and_then(|set| set.get(second))
                    }
                    PairAdjustment::Format2 {
                        coverage: _,
                        classes,
                        matrix,
                    } => matrix.get((classes.0.get(first), classes.1.get(second))),
                };
                if let Some((record, _)) = records {
                    return Some(record.x_advance);
                }
            }
        }
        self.kern_subtables
            .iter()
            .find_map(|st| st.glyphs_kerning(first, second))
    }
}
