//! Bricks, brick kinds and level layouts

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Takes 2 hits (3 from level 4 on)
    Durable,
    /// Cannot be destroyed, doesn't count for level clear
    Unbreakable,
    /// Destroys its neighbors when it breaks
    Explosive,
    /// Always drops a bonus
    Bonus,
}

/// Static per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickSpec {
    pub hp: u32,
    pub points: u32,
    pub destroyable: bool,
}

/// Normal bricks cycle through these by row
pub const NORMAL_ROW_COLORS: [Rgb; 3] = [
    [255, 0, 255], // magenta
    [0, 255, 255], // cyan
    [57, 255, 20], // green
];
pub const DURABLE_SILVER: Rgb = [192, 192, 192];
pub const DURABLE_GOLD: Rgb = [255, 215, 0];
pub const UNBREAKABLE_COLOR: Rgb = [80, 80, 100];
pub const EXPLOSIVE_COLOR: Rgb = [255, 100, 50];
pub const BONUS_COLOR: Rgb = [255, 200, 100];

/// Shake time after a hit on a destroyable brick (seconds)
const HIT_SHAKE: f32 = 0.1;
/// Unbreakable bricks rattle a little longer
const METAL_SHAKE: f32 = 0.2;
/// Max horizontal shake offset in pixels
const SHAKE_AMPLITUDE: f32 = 2.0;

impl BrickKind {
    pub const fn spec(self) -> BrickSpec {
        match self {
            BrickKind::Normal => BrickSpec {
                hp: 1,
                points: 10,
                destroyable: true,
            },
            BrickKind::Durable => BrickSpec {
                hp: 2,
                points: 25,
                destroyable: true,
            },
            BrickKind::Unbreakable => BrickSpec {
                hp: 999,
                points: 0,
                destroyable: false,
            },
            BrickKind::Explosive => BrickSpec {
                hp: 1,
                points: 15,
                destroyable: true,
            },
            BrickKind::Bonus => BrickSpec {
                hp: 1,
                points: 20,
                destroyable: true,
            },
        }
    }

    /// Layout legend: N, D, U, E, B. Anything else is an empty cell.
    pub fn from_layout_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(BrickKind::Normal),
            'D' => Some(BrickKind::Durable),
            'U' => Some(BrickKind::Unbreakable),
            'E' => Some(BrickKind::Explosive),
            'B' => Some(BrickKind::Bonus),
            _ => None,
        }
    }

    fn base_color(self, row: usize, max_hp: u32) -> Rgb {
        match self {
            BrickKind::Normal => NORMAL_ROW_COLORS[row % NORMAL_ROW_COLORS.len()],
            BrickKind::Durable if max_hp >= 3 => DURABLE_GOLD,
            BrickKind::Durable => DURABLE_SILVER,
            BrickKind::Unbreakable => UNBREAKABLE_COLOR,
            BrickKind::Explosive => EXPLOSIVE_COLOR,
            BrickKind::Bonus => BONUS_COLOR,
        }
    }
}

/// What a destroyed brick asks of the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destruction {
    pub kind: BrickKind,
    pub points: u32,
    /// Caller must blast neighbors (one tier only)
    pub explosive: bool,
    /// Caller must spawn a bonus without rolling
    pub bonus_guaranteed: bool,
    pub center: Vec2,
}

/// Result of a single hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Unbreakable brick; only feedback
    Indestructible,
    /// Lost a hit point but still standing
    Damaged,
    Destroyed(Destruction),
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
    /// Grid row (drives normal brick color)
    pub row: usize,
    pub hp: u32,
    pub max_hp: u32,
    pub points: u32,
    pub destroyable: bool,
    pub visible: bool,
    pub color: Rgb,
    pub original_color: Rgb,
    /// Seconds of shake left
    pub shake_time: f32,
    /// Horizontal draw offset while shaking
    pub shake_offset: f32,
}

impl Brick {
    pub fn new(rect: Rect, kind: BrickKind, row: usize) -> Self {
        let spec = kind.spec();
        let color = kind.base_color(row, spec.hp);
        Self {
            rect,
            kind,
            row,
            hp: spec.hp,
            max_hp: spec.hp,
            points: spec.points,
            destroyable: spec.destroyable,
            visible: true,
            color,
            original_color: color,
            shake_time: 0.0,
            shake_offset: 0.0,
        }
    }

    /// Override starting hit points (recolors durable bricks)
    pub fn with_max_hp(mut self, hp: u32) -> Self {
        self.max_hp = hp;
        self.hp = hp;
        self.color = self.kind.base_color(self.row, hp);
        self.original_color = self.color;
        self
    }

    /// Apply one hit
    pub fn hit(&mut self) -> HitOutcome {
        if !self.destroyable {
            self.shake_time = METAL_SHAKE;
            return HitOutcome::Indestructible;
        }

        self.hp = self.hp.saturating_sub(1);
        self.shake_time = HIT_SHAKE;

        if self.hp == 0 {
            self.visible = false;
            return HitOutcome::Destroyed(Destruction {
                kind: self.kind,
                points: self.points,
                explosive: self.kind == BrickKind::Explosive,
                bonus_guaranteed: self.kind == BrickKind::Bonus,
                center: self.rect.center(),
            });
        }

        // Damaged durable bricks darken toward half brightness
        if self.kind == BrickKind::Durable {
            let factor = 0.5 + 0.5 * self.hp_ratio();
            self.color = self.original_color.map(|c| (c as f32 * factor) as u8);
        }
        HitOutcome::Damaged
    }

    /// Remaining hit points as a fraction of max
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }

    /// True while this brick still blocks the level from clearing
    pub fn blocks_clear(&self) -> bool {
        self.visible && self.destroyable
    }

    /// Advance shake animation
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            self.shake_offset = rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE);
        } else {
            self.shake_offset = 0.0;
        }
    }
}

/// Level patterns, one string per row. Levels repeat once exhausted.
pub const LEVELS: &[&[&str]] = &[
    &[
        "NNNNNNNNNN",
        "NNNNNNNNNN",
        "NNNNNNNNNN",
        "NNNNNNNNNN",
        "NNNNNNNNNN",
    ],
    &[
        "NNNNNNNNNN",
        "NDNDNNDNDN",
        "NNNNBBNNNN",
        "NNENNNNENN",
        "NNNNNNNNNN",
    ],
    &[
        "DDDDDDDDDD",
        "NNNENNENNN",
        "NUNNBBNNUN",
        "NNNNNNNNNN",
        "..NNNNNN..",
    ],
    &[
        "UDDDDDDDDU",
        "NNENNNNENN",
        "NBNNUUNNBN",
        "NNNNNNNNNN",
        "NNNNNNNNNN",
    ],
    &[
        "EDNDBBDNDE",
        "DUNNNNNNUD",
        "NNEEDDEENN",
        "NBNNNNNNBN",
        "UNNNNNNNNU",
    ],
];

/// Level from which durable bricks get a third hit point
const GOLD_DURABLE_LEVEL: u32 = 4;

/// Brick grid geometry plus the level patterns
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub brick_width: f32,
    pub brick_height: f32,
    pub padding: f32,
    pub offset_left: f32,
    pub offset_top: f32,
    pub rows: usize,
    pub cols: usize,
}

impl LevelLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            brick_width: config.brick_width,
            brick_height: config.brick_height,
            padding: config.brick_padding,
            offset_left: config.brick_offset_left(),
            offset_top: config.brick_offset_top,
            rows: config.brick_rows,
            cols: config.brick_cols,
        }
    }

    /// Build the bricks for a 1-based level number
    pub fn create_level(&self, level: u32) -> Vec<Brick> {
        let index = (level.max(1) as usize - 1) % LEVELS.len();
        self.build(LEVELS[index], level)
    }

    /// Build bricks from an arbitrary pattern
    pub fn build(&self, pattern: &[&str], level: u32) -> Vec<Brick> {
        let mut bricks = Vec::new();
        for (row, line) in pattern.iter().take(self.rows).enumerate() {
            for (col, c) in line.chars().take(self.cols).enumerate() {
                let Some(kind) = BrickKind::from_layout_char(c) else {
                    continue;
                };
                let x = self.offset_left + col as f32 * (self.brick_width + self.padding);
                let y = self.offset_top + row as f32 * (self.brick_height + self.padding);
                let rect = Rect::new(x, y, self.brick_width, self.brick_height);

                let mut brick = Brick::new(rect, kind, row);
                if kind == BrickKind::Durable && level >= GOLD_DURABLE_LEVEL {
                    brick = brick.with_max_hp(3);
                }
                bricks.push(brick);
            }
        }
        bricks
    }

    /// Indices of bricks caught in the blast of `bricks[exploded]`
    ///
    /// The blast covers one cell in every direction: the brick's rect grown
    /// by a brick plus padding on each axis. Only visible, destroyable bricks
    /// are returned.
    pub fn explosion_targets(&self, bricks: &[Brick], exploded: usize) -> Vec<usize> {
        let blast = bricks[exploded].rect.inflate(
            self.brick_width + self.padding * 2.0,
            self.brick_height + self.padding * 2.0,
        );

        bricks
            .iter()
            .enumerate()
            .filter(|&(i, b)| i != exploded && b.blocks_clear() && blast.intersects(&b.rect))
            .map(|(i, _)| i)
            .collect()
    }
}
