use std::env;

use reelgen::sketches::golden_spiral::{GoldenSpiral, SpiralConfig};
use reelgen::{CapturingCompositor, LogExporter, RunConfig, SketchRunner};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let frames: u64 = match args.next() {
        Some(n) => n.parse()?,
        None => 998,
    };
    let config = match args.next() {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default().with_seed(1),
    };

    let sketch = GoldenSpiral::new(SpiralConfig::default())?;
    let mut runner = SketchRunner::new(
        sketch,
        CapturingCompositor::canvas_only(),
        LogExporter::new(),
        config,
    )?;
    let stats = runner.run_frames(frames)?;

    let param = runner.sketch().sweep().param();
    println!(
        "ticks={} a={} direction={} loops={} ops_on_canvas={} exported={}",
        stats.ticks,
        param.value(),
        param.direction(),
        param.loops(),
        runner.compositor().layered_ops().len(),
        stats.frames_exported,
    );
    Ok(())
}
