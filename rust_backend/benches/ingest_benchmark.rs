use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use neo_ingest::parsing::csv_parser::parse_neos_csv_str;
use neo_ingest::parsing::json_parser::parse_approaches_json_str;
use std::hint::black_box;

fn neos_csv(rows: usize) -> String {
    let mut csv = String::from("pdes,name,diameter,pha\n");
    for i in 0..rows {
        if i % 3 == 0 {
            csv.push_str(&format!("{},Body{},{:.3},N\n", 1000 + i, i, 0.5 + i as f64 * 0.01));
        } else {
            csv.push_str(&format!("2020 A{},,,{}\n", i, if i % 7 == 0 { "Y" } else { "N" }));
        }
    }
    csv
}

fn cad_json(rows: usize) -> String {
    let data: Vec<String> = (0..rows)
        .map(|i| {
            format!(
                r#"["{}","12","2451545.5","2000-Jan-{:02} 12:00","{:.6}","0","0","{:.3}","0","00:01","21.0"]"#,
                1000 + i,
                i % 28 + 1,
                0.01 + i as f64 * 1e-4,
                5.0 + (i % 40) as f64
            )
        })
        .collect();
    format!(r#"{{"count":"{}","data":[{}]}}"#, rows, data.join(","))
}

fn bench_neo_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("neo_catalog");

    for rows in [100, 10_000] {
        let input = neos_csv(rows);
        group.bench_with_input(BenchmarkId::new("parse_csv", rows), &input, |b, input| {
            b.iter(|| parse_neos_csv_str(black_box(input)).unwrap());
        });
    }

    group.finish();
}

fn bench_close_approaches(c: &mut Criterion) {
    let mut group = c.benchmark_group("close_approaches");

    for rows in [100, 10_000] {
        let input = cad_json(rows);
        group.bench_with_input(BenchmarkId::new("parse_json", rows), &input, |b, input| {
            b.iter(|| parse_approaches_json_str(black_box(input)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_neo_catalog, bench_close_approaches);
criterion_main!(benches);
