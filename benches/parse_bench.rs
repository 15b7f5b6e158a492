// Standalone Rust benchmark for parse strategies and cell lookup
//
// Run: cargo bench --bench parse_bench
//
// Compares direct vs parallel parsing and times a full nested get_cell
// scan across:
//   - Plain data (no quoting)
//   - Mixed data (quoted separators, multi-line quoted fields)
//   - Various sizes (1K, 10K, 100K rows)

use std::time::{Duration, Instant};

use csvcells::{parse_bytes, parse_bytes_parallel, ParserConfig, Table};

/// Generate plain CSV (no field needs quoting)
fn generate_plain(num_rows: usize, fields_per_row: usize) -> Vec<u8> {
    let mut out = String::new();
    for i in 0..num_rows {
        let row: Vec<String> = (0..fields_per_row)
            .map(|j| format!("field_{}_{}_value", i, j))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

/// Generate mixed CSV (quoted separators and embedded line breaks)
fn generate_mixed(num_rows: usize, fields_per_row: usize) -> Vec<u8> {
    let mut out = String::new();
    for i in 0..num_rows {
        let row: Vec<String> = (0..fields_per_row)
            .map(|j| match j % 5 {
                0 => format!("plain_value_{}", i),
                1 => format!("\"has,comma_{}\"", i),
                2 => format!("\"has\nnewline_{}\"", i),
                3 => String::new(),
                _ => format!("\u{201C}smart,{}\u{201D}", j),
            })
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

struct BenchResult {
    name: String,
    iterations: u64,
    total_time: Duration,
    input_size: usize,
}

impl BenchResult {
    fn avg_ns(&self) -> f64 {
        self.total_time.as_nanos() as f64 / self.iterations as f64
    }

    fn throughput_mb_s(&self) -> f64 {
        let secs_per_iter = self.avg_ns() / 1_000_000_000.0;
        self.input_size as f64 / secs_per_iter / 1_000_000.0
    }
}

fn bench_fn<T, F: Fn() -> T>(
    name: &str,
    input_size: usize,
    f: F,
    warmup_secs: f64,
    bench_secs: f64,
) -> BenchResult {
    let warmup_deadline = Instant::now() + Duration::from_secs_f64(warmup_secs);
    while Instant::now() < warmup_deadline {
        std::hint::black_box(f());
    }

    let mut iterations: u64 = 0;
    let start = Instant::now();
    let deadline = start + Duration::from_secs_f64(bench_secs);
    while Instant::now() < deadline {
        std::hint::black_box(f());
        iterations += 1;
    }

    BenchResult {
        name: name.to_string(),
        iterations,
        total_time: start.elapsed(),
        input_size,
    }
}

fn print_results(results: &[BenchResult]) {
    let max_name_len = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for r in results {
        println!(
            "  {:<width$}  {:>10.2} µs/iter  {:>8.1} MB/s",
            r.name,
            r.avg_ns() / 1000.0,
            r.throughput_mb_s(),
            width = max_name_len,
        );
    }
}

/// Touch every coordinate the way a row/column report would
fn scan_all(table: &Table) -> usize {
    let mut bytes = 0;
    for r in 0..table.row_count() {
        for c in 0..table.column_count() {
            bytes += table.get_cell(r, c).bytes;
        }
    }
    bytes
}

fn run_benchmark_suite(label: &str, input: &[u8], warmup: f64, time: f64) {
    let config = ParserConfig::csv();
    println!("\n--- {} ---", label);

    // Verify both strategies agree before timing them
    let direct = parse_bytes(input, &config).expect("direct parse");
    let parallel = parse_bytes_parallel(input, &config).expect("parallel parse");
    assert_eq!(direct, parallel, "parallel table differs from direct!");
    println!(
        "  Table: {} rows x {} columns (strategies match)",
        direct.row_count(),
        direct.column_count()
    );

    let results = vec![
        bench_fn("Direct", input.len(), || parse_bytes(input, &config), warmup, time),
        bench_fn("Parallel", input.len(), || parse_bytes_parallel(input, &config), warmup, time),
        bench_fn("Scan get_cell", input.len(), || scan_all(&direct), warmup, time),
    ];
    print_results(&results);
}

fn main() {
    println!("=== CsvCells Parse Benchmark ===");

    let warmup = 1.0;
    let time = 3.0;

    let input = generate_plain(1_000, 10);
    run_benchmark_suite("1K rows x 10 fields (plain)", &input, warmup, time);

    let input = generate_plain(10_000, 10);
    run_benchmark_suite("10K rows x 10 fields (plain)", &input, warmup, time);

    let input = generate_mixed(10_000, 10);
    run_benchmark_suite("10K rows x 10 fields (mixed, quoted)", &input, warmup, time);

    let input = generate_mixed(100_000, 10);
    run_benchmark_suite("100K rows x 10 fields (mixed, quoted)", &input, warmup, time);

    println!("\n=== Done ===");
}
