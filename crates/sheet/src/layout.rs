// STD Dependencies -----------------------------------------------------------
use std::ops::Range;
use std::path::Path;


// Sheet Geometry -------------------------------------------------------------
pub const SPRITE_SIZE: i64 = 40;
pub const SLICES_PER_SOURCE: usize = 6;
pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 480;

/// Sprite row used by odd slices.
pub const ODD_ROW: i64 = 6;


// Layout Rules ---------------------------------------------------------------
/// Restricts the slices a source file contributes to sheets whose output
/// path contains `sheet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRule {
    pub file: &'static str,
    pub sheet: &'static str,
    pub slices: Range<usize>
}

/// Moves every slice on sheets whose output path contains `sheet` to the
/// left by `columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRule {
    pub sheet: &'static str,
    pub columns: i64
}

// dragitem22 does not fit onto sheet 04, its last four slices go onto sheet 05
pub const SPLIT_RULES: &[SplitRule] = &[
    SplitRule {
        file: "dragitem22.tga",
        sheet: "dragitem04",
        slices: 0..2
    },
    SplitRule {
        file: "dragitem22.tga",
        sheet: "dragitem05",
        slices: 2..6
    }
];

pub const SHIFT_RULES: &[ShiftRule] = &[
    ShiftRule {
        sheet: "dragitem05",
        columns: 2
    }
];


// Sheet Layout ---------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub source: usize,
    pub slice: usize,
    pub x: i64,
    pub y: i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    placements: Vec<Placement>
}

impl SheetLayout {

    pub fn plan<S: AsRef<str>>(files: &[S], output: &Path) -> Self {
        Self::plan_with_rules(files, output, SPLIT_RULES, SHIFT_RULES)
    }

    pub fn plan_with_rules<S: AsRef<str>>(
        files: &[S],
        output: &Path,
        split_rules: &[SplitRule],
        shift_rules: &[ShiftRule]

    ) -> Self {
        let output = output.to_string_lossy();
        let shift: i64 = shift_rules.iter().filter(|rule| {
            output.contains(rule.sheet)

        }).map(|rule| rule.columns).sum();

        let mut placements = Vec::with_capacity(files.len() * SLICES_PER_SOURCE);
        for (source, file) in files.iter().enumerate() {
            let slices = split_rules.iter().filter(|rule| {
                rule.file == file.as_ref() && output.contains(rule.sheet)

            }).fold(0..SLICES_PER_SOURCE, |allowed, rule| {
                allowed.start.max(rule.slices.start)..allowed.end.min(rule.slices.end)
            });

            let base = SPRITE_SIZE * source as i64 * SLICES_PER_SOURCE as i64 / 2;
            for slice in slices {
                let (column, row) = if slice % 2 == 0 {
                    (slice as i64, 0)

                } else {
                    (slice as i64 - 1, ODD_ROW)
                };
                placements.push(Placement {
                    source,
                    slice,
                    x: base + SPRITE_SIZE * (column - shift) / 2,
                    y: SPRITE_SIZE * row
                });
            }
        }
        Self {
            placements
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placements_for(&self, source: usize) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.source == source)
    }

}
