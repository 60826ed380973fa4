//! Benchmark suite for the recall engine.
//!
//! Keeps the hot paths honest:
//!   word_list_generation ......... trial-list sampling + shuffle
//!   base_level_pass_24 ........... one activation update over 24 chunks
//!   choice_select_25 ............. one competition over 24 items + nil
//!   full_session_12_words ........ study + recall end to end

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rand::SeedableRng;
use rand::rngs::StdRng;

use recall_core::activation::BaseLevel;
use recall_core::choice::Choice;
use recall_core::chunk::{Chunk, ChunkStore};
use recall_core::config::RecallConfig;
use recall_core::inhibition::Inhibition;
use recall_core::pool::ActivationPool;
use recall_core::session::RecallSession;
use recall_core::stimulus::generate_word_list;
use recall_core::types::SimTime;

fn bench_word_list(c: &mut Criterion) {
    c.bench_function("word_list_generation", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let list = generate_word_list(black_box(12), true, &mut rng).expect("valid");
            black_box(list);
        });
    });
}

fn bench_base_level_pass(c: &mut Criterion) {
    let mut store = ChunkStore::new();
    let words = generate_word_list(24, true, &mut StdRng::seed_from_u64(1)).expect("valid");
    let ids = store.compile(words.iter().map(|s| Chunk::for_word(&s.word)));

    let mut blas = BaseLevel::new(0.5, 1000.0);
    blas.ignore(store.nil());
    for (k, &id) in ids.iter().enumerate() {
        blas.record_use(id, SimTime::from_ms(k as u64 * 1000));
    }

    c.bench_function("base_level_pass_24", |b| {
        b.iter(|| {
            blas.update(black_box(SimTime::from_ms(60_000)));
        });
    });
}

fn bench_choice_select(c: &mut Criterion) {
    let mut store = ChunkStore::new();
    let words = generate_word_list(24, true, &mut StdRng::seed_from_u64(2)).expect("valid");
    let ids = store.compile(words.iter().map(|s| Chunk::for_word(&s.word)));

    let mut blas = BaseLevel::new(0.5, 1000.0);
    blas.ignore(store.nil());
    for (k, &id) in ids.iter().enumerate() {
        blas.record_use(id, SimTime::from_ms(k as u64 * 1000));
    }
    blas.update(SimTime::from_ms(30_000));

    let pool = ActivationPool::new(-2.0, 1e-8);
    let pooled = pool.pool(&store, &blas, &Inhibition::new());
    let mut choice = Choice::new(0.25, Some(3));

    c.bench_function("choice_select_25", |b| {
        b.iter(|| {
            let selection = choice.select(black_box(&pooled)).expect("candidates");
            black_box(selection);
        });
    });
}

fn bench_full_session(c: &mut Criterion) {
    c.bench_function("full_session_12_words", |b| {
        b.iter(|| {
            let mut config = RecallConfig::default();
            config.list.seed = Some(99);
            let outcome = RecallSession::new(config)
                .expect("valid config")
                .run()
                .expect("session runs");
            black_box(outcome);
        });
    });
}

criterion_group!(
    benches,
    bench_word_list,
    bench_base_level_pass,
    bench_choice_select,
    bench_full_session
);
criterion_main!(benches);
