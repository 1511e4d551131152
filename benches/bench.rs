use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::Value as SerdeValue;
use turbojson::value::Value;

const SAMPLE: &str = r#"{
    "name": "turbojson",
    "version": 1,
    "active": true,
    "ratio": 0.5,
    "tags": ["json", "parser", "serializer"],
    "nested": {"a": 1, "b": [1, 2, 3, null, false]}
}"#;

fn make_large(json: &str) -> String {
    let mut large = String::from("{");
    for i in 0..10000 {
        if large.len() > 1 {
            large.push(',');
        }
        large.push_str(&format!(r#""{i}":"#));
        large.push_str(json);
    }
    large.push('}');
    large
}

fn turbojson_benchmark(c: &mut Criterion) {
    let json_large = make_large(SAMPLE);

    c.bench_function("turbojson_parse", |b| {
        b.iter(|| {
            let _: Value = turbojson::parse(SAMPLE.as_bytes()).unwrap();
        })
    });

    c.bench_function("turbojson_parse_large", |b| {
        b.iter(|| {
            let _: Value = turbojson::parse(json_large.as_bytes()).unwrap();
        })
    });

    c.bench_function("serde_parse", |b| {
        b.iter(|| {
            let _: SerdeValue = serde_json::from_str(SAMPLE).unwrap();
        })
    });

    c.bench_function("serde_parse_large", |b| {
        b.iter(|| {
            let _: SerdeValue = serde_json::from_str(&json_large).unwrap();
        })
    });

    let value = turbojson::parse(SAMPLE.as_bytes()).unwrap();
    c.bench_function("turbojson_serialize", |b| {
        b.iter(|| {
            let _ = turbojson::to_vec(&value).unwrap();
        })
    });
}

criterion_group!(benches, turbojson_benchmark);
criterion_main!(benches);
