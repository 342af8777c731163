use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use popup_wm::input::PointerEvent;
use popup_wm::{Bounds, Position, Size, WindowId, WindowManager};

#[derive(Parser, Debug)]
#[command(
    name = "popup-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drag-heavy benchmark for the popup window manager"
)]
struct BenchCli {
    /// Persona windows to open before dragging.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 64)]
    windows: usize,

    /// Pointer moves per window drag.
    #[arg(short = 'm', long = "moves", value_name = "COUNT", default_value_t = 500)]
    moves: usize,

    /// Total pointer displacement per drag, in pixels, on both axes.
    #[arg(short = 'd', long = "distance", value_name = "PIXELS", default_value_t = 240.0)]
    distance: f64,
}

struct BenchConfig {
    windows: usize,
    moves: usize,
    distance: f64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=10_000).contains(&cli.windows) {
            return Err("windows must be between 1 and 10000".to_string());
        }
        if !(1..=1_000_000).contains(&cli.moves) {
            return Err("moves must be between 1 and 1000000".to_string());
        }
        if !cli.distance.is_finite() {
            return Err("distance must be finite".to_string());
        }
        Ok(Self {
            windows: cli.windows,
            moves: cli.moves,
            distance: cli.distance,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args).map_err(io::Error::other)?;
    let stats = run_benchmark(&config)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn run_benchmark(config: &BenchConfig) -> io::Result<BenchStats> {
    let mut wm = WindowManager::default();
    wm.set_viewport(Size::new(4000.0, 3000.0));
    wm.set_canvas(Bounds::new(Position::default(), Size::new(4000.0, 3000.0)));
    let ids: Vec<WindowId> = (0..config.windows)
        .map(|_| wm.open_new_persona())
        .collect();

    let mut stats = BenchStats::new();
    for id in ids {
        let Some(start) = wm.window(id).and_then(|w| w.position()) else {
            return Err(io::Error::other(format!("{id} was never placed")));
        };
        // lift the window so its header is the topmost hit
        wm.bring_to_front(id);
        let grab = start.offset(20.0, 5.0);
        if !wm.handle_pointer(PointerEvent::down(grab.x, grab.y)) || !wm.is_dragging() {
            return Err(io::Error::other(format!("header of {id} did not grab")));
        }
        for step in 1..=config.moves {
            let t = step as f64 / config.moves as f64;
            // zigzag so intermediate samples wander off the straight path
            let jitter = if step % 2 == 0 { 7.0 } else { -7.0 };
            let jitter = if step == config.moves { 0.0 } else { jitter };
            let pointer = grab.offset(config.distance * t + jitter, config.distance * t);
            let began = Instant::now();
            wm.handle_pointer(PointerEvent::moved(pointer.x, pointer.y));
            stats.record_move(began.elapsed());
        }
        let end = grab.offset(config.distance, config.distance);
        wm.handle_pointer(PointerEvent::up(end.x, end.y));

        let expected = start.offset(config.distance, config.distance);
        let landed = wm.window(id).and_then(|w| w.position());
        if !landed.is_some_and(|p| close_to(p, expected)) {
            stats.mismatches += 1;
        }
    }
    stats.mark_completed();
    Ok(stats)
}

fn close_to(a: Position, b: Position) -> bool {
    const EPSILON: f64 = 1e-6;
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    move_count: u64,
    total_move_time: Duration,
    slowest_move: Duration,
    mismatches: usize,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            move_count: 0,
            total_move_time: Duration::ZERO,
            slowest_move: Duration::ZERO,
            mismatches: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_move(&mut self, took: Duration) {
        self.move_count = self.move_count.saturating_add(1);
        self.total_move_time += took;
        if took > self.slowest_move {
            self.slowest_move = took;
        }
    }

    fn average_move_us(&self) -> f64 {
        if self.move_count == 0 {
            return 0.0;
        }
        (self.total_move_time.as_secs_f64() / self.move_count as f64) * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let moves_per_second = if elapsed > 0.0 {
            self.move_count as f64 / elapsed
        } else {
            0.0
        };
        let status = if self.mismatches == 0 {
            "ok"
        } else {
            "FAILED path-independence check"
        };

        indoc::formatdoc!(
            r#"
            Drag bench {status}.
            Windows: {windows} | Moves per drag: {moves}
            Duration: {elapsed:.3}s | Moves: {total} (~{rate:.0}/s)
            Avg move: {avg:.2} us | Worst: {worst:.2} us
            Final position mismatches: {mismatches}
            "#,
            status = status,
            windows = config.windows,
            moves = config.moves,
            elapsed = elapsed,
            total = self.move_count,
            rate = moves_per_second,
            avg = self.average_move_us(),
            worst = self.slowest_move.as_secs_f64() * 1_000_000.0,
            mismatches = self.mismatches,
        )
    }
}
