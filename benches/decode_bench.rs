use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsontape::structural::StructuralIndex;
use jsontape::{Document, ParserOptions, PADDING};

// ---------------------------------------------------------------------------
// Test data generators
// ---------------------------------------------------------------------------

fn padded(bytes: &[u8]) -> (Vec<u8>, usize) {
    let len = bytes.len();
    let mut v = bytes.to_vec();
    v.resize(len + PADDING, 0);
    (v, len)
}

fn ascii_string(len: usize) -> Vec<u8> {
    let mut s = Vec::with_capacity(len + 2);
    s.push(b'"');
    for i in 0..len {
        s.push(b'a' + (i % 26) as u8);
    }
    s.push(b'"');
    s
}

fn escaped_string(len: usize) -> Vec<u8> {
    let mut s = Vec::with_capacity(len * 2 + 2);
    s.push(b'"');
    let escapes: &[&[u8]] = &[b"\\n", b"\\t", b"\\\"", b"\\\\", b"\\/", b"\\r"];
    let mut total = 0;
    let mut idx = 0;
    while total < len {
        let esc = escapes[idx % escapes.len()];
        s.extend_from_slice(esc);
        total += esc.len();
        if total < len {
            s.push(b'x');
            total += 1;
        }
        idx += 1;
    }
    s.push(b'"');
    s
}

fn json_object(num_keys: usize, value_len: usize) -> Vec<u8> {
    let mut s = String::from("{");
    for i in 0..num_keys {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("\"key_{i}\":"));
        s.push('"');
        for j in 0..value_len {
            s.push((b'a' + (j % 26) as u8) as char);
        }
        s.push('"');
    }
    s.push('}');
    s.into_bytes()
}

fn json_array_of_objects(num_objects: usize, num_keys: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..num_objects {
        if i > 0 {
            s.push(',');
        }
        s.push('{');
        for j in 0..num_keys {
            if j > 0 {
                s.push(',');
            }
            s.push_str(&format!("\"key_{j}\":\"val{}\"", i * num_keys + j));
        }
        s.push('}');
    }
    s.push(']');
    s.into_bytes()
}

fn pretty_printed_json(num_keys: usize) -> Vec<u8> {
    let mut s = String::from("{\n");
    for i in 0..num_keys {
        if i > 0 {
            s.push_str(",\n");
        }
        s.push_str(&format!("    \"key_{i}\": \"value_{i}\""));
    }
    s.push_str("\n}");
    s.into_bytes()
}

fn integer_array(count: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..count {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&(i as i64 * 1234567).to_string());
    }
    s.push(']');
    s.into_bytes()
}

fn float_array(count: usize) -> Vec<u8> {
    let mut s = String::from("[");
    for i in 0..count {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("{:.6}", i as f64 * 3.14159265));
    }
    s.push(']');
    s.into_bytes()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_structural_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural_index");

    for num_keys in [10, 50, 200] {
        let obj = json_object(num_keys, 20);
        let (padded_obj, len) = padded(&obj);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(
            BenchmarkId::new("object", format!("{num_keys}keys")),
            &padded_obj,
            |b, data| b.iter(|| StructuralIndex::build(black_box(data), len)),
        );
    }

    for num_objects in [10, 100] {
        let arr = json_array_of_objects(num_objects, 5);
        let (padded_arr, len) = padded(&arr);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(
            BenchmarkId::new("array_of_objects", format!("{num_objects}x5")),
            &padded_arr,
            |b, data| b.iter(|| StructuralIndex::build(black_box(data), len)),
        );
    }

    for num_keys in [20, 100] {
        let pp = pretty_printed_json(num_keys);
        let (padded_pp, len) = padded(&pp);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(
            BenchmarkId::new("pretty_printed", format!("{num_keys}keys")),
            &padded_pp,
            |b, data| b.iter(|| StructuralIndex::build(black_box(data), len)),
        );
    }

    group.finish();
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_parse");

    let cases: Vec<(&str, Vec<u8>)> = vec![
        ("object_50keys", json_object(50, 20)),
        ("array_of_objects_100x5", json_array_of_objects(100, 5)),
        ("pretty_printed_100keys", pretty_printed_json(100)),
        ("integer_array_1000", integer_array(1000)),
        ("float_array_1000", float_array(1000)),
    ];

    for (name, input) in &cases {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", *name), input, |b, data| {
            let mut doc = Document::with_capacity(&ParserOptions::default());
            b.iter(|| doc.parse(black_box(data), &ParserOptions::default()).unwrap());
        });
    }

    group.finish();
}

fn bench_string_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_parse");

    for size in [32, 128, 512, 4096, 65536] {
        let ascii = ascii_string(size);
        group.throughput(Throughput::Bytes(ascii.len() as u64));
        group.bench_with_input(BenchmarkId::new("ascii", size), &ascii, |b, data| {
            b.iter(|| {
                let mut arena = Vec::new();
                jsontape::string::parse_string(black_box(data), 0, &mut arena, true)
            })
        });

        let escaped = escaped_string(size);
        group.throughput(Throughput::Bytes(escaped.len() as u64));
        group.bench_with_input(BenchmarkId::new("escaped", size), &escaped, |b, data| {
            b.iter(|| {
                let mut arena = Vec::new();
                jsontape::string::parse_string(black_box(data), 0, &mut arena, true)
            })
        });
    }
    group.finish();
}

fn bench_number_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("number_parse");

    let cases: &[(&str, &[u8])] = &[
        ("small_int", b"42"),
        ("large_int", b"1234567890123456789"),
        ("negative", b"-9876543210"),
        ("simple_float", b"3.14159265"),
        ("scientific", b"6.022e23"),
        ("neg_scientific", b"-1.23456789e-10"),
    ];

    for (name, data) in cases {
        group.bench_with_input(BenchmarkId::new("parse", *name), data, |b, data| {
            b.iter(|| jsontape::number::parse_number(black_box(data), 0, 1024))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_structural_index,
    bench_full_parse,
    bench_string_parse,
    bench_number_parse,
);
criterion_main!(benches);
