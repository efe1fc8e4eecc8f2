use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use slirc_dialects::context::{NoLookup, ValidationContext};
use slirc_dialects::dialects::juno;
use slirc_dialects::ModeTranslator;
use slirc_modes::ChannelModes;

fn table_benchmark(c: &mut Criterion) {
    let descriptor = juno::descriptor().unwrap();
    let table = descriptor.channel_modes();
    let all = table.all_flags();
    let mut group = c.benchmark_group("table");

    group.bench_function("encode_all", |b| b.iter(|| table.encode(all)));
    group.bench_function("decode_all", |b| {
        let letters = table.encode(all);
        b.iter(|| table.decode(&letters).flags)
    });
    group.bench_function("char_for_last", |b| {
        b.iter(|| table.char_for(ChannelModes::SSL_ONLY))
    });

    group.finish();
}

fn translate_benchmark(c: &mut Criterion) {
    let descriptor = juno::descriptor().unwrap();
    let translator = ModeTranslator::new(&descriptor);
    let ctx = ValidationContext::internal(&NoLookup);
    let modes = "+ntsk-m+yohvj+l-Q+fb";
    let params = ["key", "alice", "bob", "carol", "dave", "5:10", "40", "#overflow", "*!*@spam"];

    let mut group = c.benchmark_group("translate");
    group.throughput(Throughput::Elements(modes.len() as u64));

    group.bench_function("channel", |b| {
        b.iter(|| translator.channel(modes, &params, &ctx))
    });
    group.bench_function("render", |b| {
        let t = translator.channel(modes, &params, &ctx);
        b.iter(|| translator.render(&t.changes))
    });
    group.bench_function("user", |b| b.iter(|| translator.user("+iD-o+S")));

    group.finish();
}

criterion_group!(benches, table_benchmark, translate_benchmark);
criterion_main!(benches);
