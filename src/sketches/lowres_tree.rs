//! Pixelated hill scene with a tree that grows branch by branch.
//!
//! Everything is laid out on a coarse grid of `pixel`-sized cells. The tree lives in a
//! [`BranchArena`]: branches are records addressed by [`BranchId`], with child links stored as
//! id lists.

use crate::encode::export::FilenamePattern;
use crate::engine::sketch::{Sketch, SketchFlow, TickCtx};
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::map_range;
use crate::foundation::rng::SketchRng;
use crate::scene::painter::Painter;

const BARK: Rgba8 = Rgba8::rgb(101, 67, 33);
const LEAF: Rgba8 = Rgba8::rgb(34, 100, 34);
const POLLEN: Rgba8 = Rgba8::rgb(255, 215, 0);

const PETALS: [Rgba8; 5] = [
    Rgba8::rgb(220, 20, 60),
    Rgba8::rgb(255, 215, 0),
    Rgba8::rgb(255, 182, 193),
    Rgba8::rgb(147, 112, 219),
    Rgba8::rgb(255, 255, 255),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(pub usize);

/// Growth rules shared by every branch.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Growth accumulated per tick; a segment is laid once it reaches 1.
    pub growth_per_tick: f64,
    /// Half-width of the heading perturbation after each segment (degrees).
    pub heading_jitter_deg: f64,
    pub branch_probability: f64,
    /// A branch must have more segments than this before it can fork.
    pub fork_after_segments: usize,
    pub max_depth: u32,
    pub trunk_segments: usize,
    pub branch_segments: usize,
    /// Child divergence range (degrees).
    pub spread_deg: (f64, f64),
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            growth_per_tick: 0.2,
            heading_jitter_deg: 5.0,
            branch_probability: 0.3,
            fork_after_segments: 3,
            max_depth: 5,
            trunk_segments: 20,
            branch_segments: 8,
            spread_deg: (25.0, 35.0),
        }
    }
}

impl GrowthParams {
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.growth_per_tick > 0.0 && self.growth_per_tick <= 1.0) {
            return Err(ReelError::validation("growth_per_tick must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.branch_probability) {
            return Err(ReelError::validation("branch_probability must be in [0, 1]"));
        }
        if self.spread_deg.0 > self.spread_deg.1 {
            return Err(ReelError::validation("spread_deg must be (min, max)"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    pub parent: Option<BranchId>,
    pub depth: u32,
    /// Current growing tip, in grid cells.
    pub tip: Point,
    pub heading_deg: f64,
    pub quota: usize,
    pub segments: Vec<Point>,
    pub children: Vec<BranchId>,
    growth: f64,
    growing: bool,
}

impl Branch {
    fn new(parent: Option<BranchId>, depth: u32, tip: Point, heading_deg: f64, quota: usize) -> Self {
        Self {
            parent,
            depth,
            tip,
            heading_deg,
            quota,
            segments: Vec::new(),
            children: Vec::new(),
            growth: 0.0,
            growing: true,
        }
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }
}

#[derive(Clone, Debug)]
pub struct BranchArena {
    branches: Vec<Branch>,
    params: GrowthParams,
}

impl BranchArena {
    /// Start with a single trunk at `root` heading `heading_deg` (0° points along +x, -90° up).
    pub fn new(root: Point, heading_deg: f64, params: GrowthParams) -> ReelResult<Self> {
        params.validate()?;
        let trunk = Branch::new(None, 0, root, heading_deg, params.trunk_segments);
        Ok(Self {
            branches: vec![trunk],
            params,
        })
    }

    pub fn root(&self) -> BranchId {
        BranchId(0)
    }

    pub fn get(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BranchId, &Branch)> {
        self.branches.iter().enumerate().map(|(i, b)| (BranchId(i), b))
    }

    pub fn is_growing(&self) -> bool {
        self.branches.iter().any(|b| b.growing)
    }

    /// Depth-first order: each branch before its children, children in creation order.
    pub fn preorder(&self) -> Vec<BranchId> {
        let mut out = Vec::with_capacity(self.branches.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(b) = self.get(id) {
                stack.extend(b.children.iter().rev().copied());
            }
        }
        out
    }

    /// Advance every branch one tick, parents before children. Forks made during the tick are
    /// stepped in the same tick.
    pub fn step(&mut self, rng: &mut SketchRng) {
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            self.grow(id, rng);
            if let Some(b) = self.get(id) {
                stack.extend(b.children.iter().rev().copied());
            }
        }
    }

    fn grow(&mut self, id: BranchId, rng: &mut SketchRng) {
        let p = &self.params;
        let Some(b) = self.branches.get_mut(id.0) else {
            return;
        };
        if !b.growing {
            return;
        }
        b.growth += p.growth_per_tick;

        let mut fork = None;
        if b.growth >= 1.0 && b.segments.len() < b.quota {
            let rad = b.heading_deg.to_radians();
            let next = Point::new(b.tip.x + rad.cos(), b.tip.y + rad.sin());
            b.segments.push(next);
            b.tip = next;
            b.growth = 0.0;
            b.heading_deg += rng.range(-p.heading_jitter_deg, p.heading_jitter_deg);

            if rng.unit() < p.branch_probability
                && b.depth < p.max_depth
                && b.segments.len() > p.fork_after_segments
            {
                let (lo, hi) = p.spread_deg;
                let left = b.heading_deg - rng.range(lo, hi);
                let right = b.heading_deg + rng.range(lo, hi);
                fork = Some((b.tip, b.depth + 1, left, right));
            }
        }
        if b.segments.len() >= b.quota {
            b.growing = false;
        }

        if let Some((at, depth, left, right)) = fork {
            let quota = self.params.branch_segments;
            for heading in [left, right] {
                let child = BranchId(self.branches.len());
                self.branches
                    .push(Branch::new(Some(id), depth, at, heading, quota));
                self.branches[id.0].children.push(child);
            }
            tracing::trace!(parent = id.0, depth, "branch forked");
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flower {
    pub cell: Point,
    pub petal: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub canvas: Canvas,
    /// Side of one grid cell in canvas pixels.
    pub pixel: u32,
    pub flowers: usize,
    pub growth: GrowthParams,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REEL,
            pixel: 8,
            flowers: 30,
            growth: GrowthParams::default(),
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if self.pixel == 0 {
            return Err(ReelError::validation("pixel size must be > 0"));
        }
        if self.canvas.width / self.pixel < 12 || self.canvas.height / self.pixel < 12 {
            return Err(ReelError::validation("canvas too small for the pixel grid"));
        }
        self.growth.validate()
    }
}

/// Landscape proportions in grid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Terrain {
    pub cols: i64,
    pub rows: i64,
    pub horizon: i64,
    pub hill_peak: i64,
    pub hill_center: f64,
    pub hill_width: f64,
}

impl Terrain {
    pub fn new(cols: i64, rows: i64) -> Self {
        Self {
            cols,
            rows,
            horizon: (rows as f64 * 0.85).round() as i64,
            hill_peak: (rows as f64 * 0.55).round() as i64,
            hill_center: cols as f64 * 0.6,
            hill_width: cols as f64 * 0.8,
        }
    }

    /// Top row of the hill at column `x` (parabolic).
    pub fn hill_top(&self, x: i64) -> f64 {
        let u = (x as f64 - self.hill_center) / (self.hill_width / 2.0);
        self.hill_peak as f64 + u * u * (self.horizon - self.hill_peak) as f64
    }

    /// Deterministic per-cell shade offset in `[-5, 4]`.
    pub fn texture(x: i64, y: i64) -> i64 {
        (x * 3 + y * 5).rem_euclid(10) - 5
    }
}

/// Sunset gradient: orange to pink to purple to dark blue.
pub fn sky_color(t: f64) -> Rgba8 {
    let (r, g, b) = if t < 0.3 {
        (
            255.0,
            map_range(t, 0.0, 0.3, 140.0, 100.0),
            map_range(t, 0.0, 0.3, 50.0, 150.0),
        )
    } else if t < 0.6 {
        (
            map_range(t, 0.3, 0.6, 255.0, 150.0),
            map_range(t, 0.3, 0.6, 100.0, 50.0),
            map_range(t, 0.3, 0.6, 150.0, 200.0),
        )
    } else {
        (
            map_range(t, 0.6, 1.0, 150.0, 50.0),
            50.0,
            map_range(t, 0.6, 1.0, 200.0, 150.0),
        )
    };
    Rgba8::from_f64(r, g, b, 255.0)
}

fn shade(base: (i64, i64, i64), v: i64) -> Rgba8 {
    Rgba8::from_f64(
        (base.0 + v) as f64,
        (base.1 + v) as f64,
        (base.2 + v) as f64,
        255.0,
    )
}

pub struct LowresTree {
    config: TreeConfig,
    terrain: Terrain,
    tree: BranchArena,
    flowers: Vec<Flower>,
}

impl LowresTree {
    pub fn new(config: TreeConfig) -> ReelResult<Self> {
        config.validate()?;
        let terrain = Terrain::new(
            i64::from(config.canvas.width / config.pixel),
            i64::from(config.canvas.height / config.pixel),
        );
        let root = Point::new(terrain.hill_center, terrain.hill_peak as f64);
        let tree = BranchArena::new(root, -90.0, config.growth.clone())?;
        Ok(Self {
            config,
            terrain,
            tree,
            flowers: Vec::new(),
        })
    }

    pub fn tree(&self) -> &BranchArena {
        &self.tree
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    fn cell(&self, p: &mut Painter<'_>, x: f64, y: f64, w: f64, h: f64) {
        let px = f64::from(self.config.pixel);
        p.rect(x * px, y * px, w * px, h * px);
    }

    fn draw_sky(&self, p: &mut Painter<'_>) {
        let t = self.terrain;
        for y in 0..t.rows {
            p.fill(sky_color(y as f64 / t.rows as f64));
            self.cell(p, 0.0, y as f64, t.cols as f64, 1.0);
        }
    }

    fn draw_ground(&self, p: &mut Painter<'_>) {
        let t = self.terrain;
        for y in t.horizon..t.rows {
            for x in 0..t.cols {
                p.fill(shade((34, 139, 34), Terrain::texture(x, y)));
                self.cell(p, x as f64, y as f64, 1.0, 1.0);
            }
        }
    }

    fn draw_hill(&self, p: &mut Painter<'_>) {
        let t = self.terrain;
        for y in t.hill_peak..t.horizon {
            for x in 0..t.cols {
                if y as f64 >= t.hill_top(x) {
                    p.fill(shade((44, 149, 44), Terrain::texture(x, y)));
                    self.cell(p, x as f64, y as f64, 1.0, 1.0);
                }
            }
        }
    }

    fn draw_flowers(&self, p: &mut Painter<'_>) {
        for f in &self.flowers {
            let Point { x, y } = f.cell;
            p.fill(f.petal);
            self.cell(p, x - 1.0, y, 1.0, 1.0);
            self.cell(p, x + 1.0, y, 1.0, 1.0);
            self.cell(p, x, y - 1.0, 1.0, 1.0);
            self.cell(p, x, y + 1.0, 1.0, 1.0);
            p.fill(POLLEN);
            self.cell(p, x, y, 1.0, 1.0);
            p.fill(LEAF);
            self.cell(p, x, y + 2.0, 1.0, 1.0);
            self.cell(p, x, y + 3.0, 1.0, 1.0);
        }
    }

    fn draw_tree(&self, p: &mut Painter<'_>) {
        for id in self.tree.preorder() {
            let Some(b) = self.tree.get(id) else {
                continue;
            };
            p.fill(BARK);
            for s in &b.segments {
                self.cell(p, s.x, s.y, 1.0, 1.0);
            }
        }
        // Leaves sit on finished outer branches and go on top of the bark.
        for (_, b) in self.tree.iter() {
            if b.is_growing() || b.depth < 2 {
                continue;
            }
            p.fill(LEAF);
            self.cell(p, b.tip.x, b.tip.y, 2.0, 2.0);
            self.cell(p, b.tip.x - 1.0, b.tip.y, 1.0, 1.0);
            self.cell(p, b.tip.x + 1.0, b.tip.y, 1.0, 1.0);
        }
    }
}

impl Sketch for LowresTree {
    fn name(&self) -> &str {
        "lowres-tree"
    }

    fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    fn filename_pattern(&self) -> FilenamePattern {
        FilenamePattern::new("lowres", 4).starting_at(1)
    }

    fn setup(&mut self, rng: &mut SketchRng) -> ReelResult<()> {
        let t = self.terrain;
        self.flowers = (0..self.config.flowers)
            .map(|_| {
                let x = rng.range(5.0, (t.cols - 5) as f64);
                let y = t.horizon as f64 + rng.range(0.0, (t.rows - t.horizon - 5) as f64);
                let petal = rng.pick(&PETALS).copied().unwrap_or(Rgba8::WHITE);
                Flower {
                    cell: Point::new(x, y),
                    petal,
                }
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) -> SketchFlow {
        self.tree.step(ctx.rng);
        SketchFlow::Continue
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.no_stroke();
        self.draw_sky(p);
        self.draw_ground(p);
        self.draw_hill(p);
        self.draw_flowers(p);
        self.draw_tree(p);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketches/lowres_tree.rs"]
mod tests;
