#[path = "utils/random.rs"]
mod random;

#[path = "utils/crossings.rs"]
mod crossings;

use crossings::*;
use geo::Rect;
use rand::thread_rng;
use random::*;

const BBOX: [f64; 2] = [1024., 1024.];

fn uniform_perf() {
    const SAMPLE_SIZE: usize = 128;
    const SCALE: f64 = 3.;

    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);
    let line_len = BBOX[0] / SCALE;

    (9..12).step_by(2).for_each(|log_num_lines| {
        let num_lines = 1 << log_num_lines;
        let lines: Vec<_> = (0..num_lines)
            .map(|_| uniform_line_with_length(&mut thread_rng(), bbox, line_len))
            .collect();
        eprintln!("Profiling with {} lines (scale = {})", num_lines, SCALE);

        (0..SAMPLE_SIZE).for_each(|_| {
            count_bo(&lines);
        });
    });
}

fn main() {
    uniform_perf();
}
