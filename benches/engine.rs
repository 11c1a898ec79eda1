use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use tokio::runtime::Runtime;

use balance_ledger::{Amount, Engine, Ledger, SourceType, State, Transaction, UserId};

/// Generates valid transaction sequences for benchmarking.
///
/// Pattern per user (repeating):
/// 1. Win 100
/// 2. Win 50
/// 3. Lose 30
///
/// This ensures losses never exceed the balance.
pub struct TxGenerator {
    next_tx_id: u64,
    num_users: UserId,
    txs_per_user: u32,
    current_user: UserId,
    current_step: u32,
}

impl TxGenerator {
    pub fn new(num_users: UserId, txs_per_user: u32) -> Self {
        Self {
            next_tx_id: 1,
            num_users,
            txs_per_user,
            current_user: 1,
            current_step: 0,
        }
    }
}

impl Iterator for TxGenerator {
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_user > self.num_users {
            return None;
        }

        let id = format!("tx-{}", self.next_tx_id);
        self.next_tx_id += 1;

        let (state, amount) = match self.current_step % 3 {
            0 => (State::Win, 10_000),
            1 => (State::Win, 5_000),
            _ => (State::Lose, 3_000),
        };
        let tx = Transaction {
            user: self.current_user,
            id,
            state,
            amount: Amount::from_scaled(amount),
            source: SourceType::Game,
        };

        self.current_step += 1;

        // Move to next user after txs_per_user transactions
        if self.current_step >= self.txs_per_user {
            self.current_step = 0;
            self.current_user += 1;
        }

        Some(tx)
    }
}

fn engine(num_users: UserId) -> Engine {
    Engine::new(Ledger::new((1..=num_users).map(|user| (user, Amount::ZERO))))
}

fn bench_sequential(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to build runtime");
    let mut group = c.benchmark_group("sequential");

    for count in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.to_async(&rt).iter(|| async move {
                let engine = engine(1);
                for tx in TxGenerator::new(1, count) {
                    let _ = black_box(engine.process(tx).await);
                }
                engine
            });
        });
    }

    group.finish();
}

fn bench_duplicates(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to build runtime");

    c.bench_function("duplicates_10k", |b| {
        b.to_async(&rt).iter(|| async {
            let engine = engine(1);
            let tx = TxGenerator::new(1, 1).next().expect("one transaction");
            for _ in 0..10_000 {
                let _ = black_box(engine.process(tx.clone()).await);
            }
            engine
        });
    });
}

fn bench_parallel_users(c: &mut Criterion) {
    let rt = Runtime::new().expect("failed to build runtime");
    let mut group = c.benchmark_group("parallel");

    // one task per user, all users processed concurrently
    for (users, txs_per) in [(10u64, 1_000u32), (100, 100), (1_000, 10)] {
        let label = format!("{users}u_{txs_per}tx");
        group.bench_with_input(
            BenchmarkId::from_parameter(&label),
            &(users, txs_per),
            |b, &(users, txs_per)| {
                b.to_async(&rt).iter(|| async move {
                    let engine = Arc::new(engine(users));
                    let mut by_user: Vec<Vec<Transaction>> = vec![Vec::new(); users as usize];
                    for tx in TxGenerator::new(users, txs_per) {
                        by_user[(tx.user - 1) as usize].push(tx);
                    }

                    let handles: Vec<_> = by_user
                        .into_iter()
                        .map(|txs| {
                            let engine = Arc::clone(&engine);
                            tokio::spawn(async move {
                                for tx in txs {
                                    let _ = black_box(engine.process(tx).await);
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        let _ = handle.await;
                    }
                    engine
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential,
    bench_duplicates,
    bench_parallel_users
);
criterion_main!(benches);
