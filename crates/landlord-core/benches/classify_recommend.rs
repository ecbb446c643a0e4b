use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use landlord_core::model::combination::classify;
use landlord_core::model::deck::Deck;
use landlord_core::model::player::PlayerPosition;
use landlord_core::strategy::{legal_candidates, offensive_posture, recommend};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let deal = Deck::shuffled_with_seed(2024).deal();

    for width in [1usize, 5, 8, 12] {
        let cards = deal.hand(PlayerPosition::South).cards()[..width].to_vec();
        group.bench_function(format!("prefix_{width}"), |b| {
            b.iter(|| black_box(classify(black_box(&cards))))
        });
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for seed in [42u64, 12345, 8675309] {
        group.bench_function(format!("free_lead_seed{seed}"), |b| {
            b.iter_batched(
                || Deck::shuffled_with_seed(seed).deal(),
                |deal| {
                    let hand = deal.hand(PlayerPosition::South);
                    let legal = legal_candidates(hand.cards(), None);
                    let offensive = offensive_posture(hand.len(), true);
                    black_box(recommend(hand, &legal, hand.len(), offensive))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_recommend);
criterion_main!(benches);
