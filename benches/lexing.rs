use criterion::{criterion_group, criterion_main, Criterion};
use dsjson::lexer::{Lexer, TokenKind};
use pprof::criterion::{Output, PProfProfiler};
use std::fs;

macro_rules! build_lex_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func(c: &mut Criterion) {
            let source = fs::read_to_string(format!("fixtures/json/valid/{}.json", $filename)).unwrap();
            c.bench_function(concat!("lex of ", $filename), |b| {
                b.iter(|| {
                    let mut lexer = Lexer::new(&source);
                    while lexer.consume().0.kind != TokenKind::Eof {}
                })
            });
        }
    };
}

build_lex_benchmark!(benchmark_blog_entries, "blog_entries");
build_lex_benchmark!(benchmark_many_properties, "many_properties");
build_lex_benchmark!(benchmark_simple, "simple");

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = benchmark_blog_entries, benchmark_many_properties, benchmark_simple
}
criterion_main!(benches);
