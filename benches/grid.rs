//! Benchmarks for hot-path grid and escape-processing operations.
//!
//! Models realistic terminal workloads: a handler driving `put_char` for
//! every printable byte of PTY output, linefeeds triggering scroll into
//! scrollback, and full byte-stream processing with SGR churn.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use corvid_core::grid::Grid;
use corvid_core::term::Term;

/// Terminal sizes that represent real usage.
const SIZES: [(usize, usize); 3] = [
    (80, 24),  // Classic VT100.
    (120, 50), // Modern split pane.
    (240, 80), // Full-screen 4K.
];

/// Mostly-ASCII line content with the occasional wide char, the shape of
/// compiler output and logs.
fn ascii_heavy_line(cols: usize) -> Vec<char> {
    let mut chars = Vec::with_capacity(cols);
    for i in 0..cols {
        if i % 20 == 19 {
            chars.push('好');
        } else {
            chars.push((b'a' + (i % 26) as u8) as char);
        }
    }
    chars
}

fn bench_put_char(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_char");
    for (cols, lines) in SIZES {
        let content = ascii_heavy_line(cols);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{cols}x{lines}")),
            &(cols, lines),
            |b, &(cols, lines)| {
                b.iter(|| {
                    let mut grid = Grid::new(cols, lines);
                    for line in 0..lines {
                        grid.goto(line, 0);
                        for &ch in &content {
                            if ch.is_ascii() {
                                grid.put_char(ch);
                            } else {
                                grid.put_wide_char(ch);
                            }
                        }
                    }
                    black_box(&grid);
                });
            },
        );
    }
    group.finish();
}

fn bench_scroll_into_scrollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_up");
    for (cols, lines) in SIZES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{cols}x{lines}")),
            &(cols, lines),
            |b, &(cols, lines)| {
                b.iter(|| {
                    let mut grid = Grid::new(cols, lines);
                    grid.goto(lines - 1, 0);
                    for _ in 0..200 {
                        grid.newline();
                    }
                    black_box(grid.scrollback.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_process_stream(c: &mut Criterion) {
    // A colored `ls`-like stream: SGR changes, text, linefeeds.
    let mut stream = Vec::new();
    for i in 0..200 {
        stream.extend_from_slice(format!("\x1b[1;3{}mitem-{i:04}\x1b[0m  ", i % 8).as_bytes());
        if i % 4 == 3 {
            stream.extend_from_slice(b"\r\n");
        }
    }

    let mut group = c.benchmark_group("process");
    group.bench_function("sgr_heavy_stream", |b| {
        b.iter(|| {
            let mut term = Term::new(120, 50, 1000);
            term.process(black_box(&stream));
            black_box(term.grid().cursor.row);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_put_char,
    bench_scroll_into_scrollback,
    bench_process_stream
);
criterion_main!(benches);
