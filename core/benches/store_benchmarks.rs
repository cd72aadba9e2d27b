use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shopcart::{MemoryStore, ProductDraft, ShopcartDraft, ShopcartRepository};
use tokio::runtime::Runtime; // To run async code within Criterion

const PRODUCT_NAMES: [&str; 5] = ["Milk", "Bread", "Eggs", "Butter", "Cheese"];

// --- Helper: store with `carts` carts of `per_cart` products each ---
fn seeded_store(rt: &Runtime, carts: i32, per_cart: usize) -> MemoryStore {
  let store = MemoryStore::new();
  rt.block_on(async {
    for id in 1..=carts {
      let products = (0..per_cart)
        .map(|i| ProductDraft {
          id: None,
          name: PRODUCT_NAMES[(id as usize + i) % PRODUCT_NAMES.len()].to_string(),
          quantity: 1,
          price: 1.0,
          shopcart_id: id,
        })
        .collect();
      ShopcartRepository::create(&store, ShopcartDraft { id, products })
        .await
        .expect("seed");
    }
  });
  store
}

fn bench_list_all(c: &mut Criterion) {
  let rt = Runtime::new().expect("runtime");
  let mut group = c.benchmark_group("memory_store_all");
  for carts in [10, 100, 1_000] {
    let store = seeded_store(&rt, carts, 4);
    group.throughput(Throughput::Elements(carts as u64));
    group.bench_with_input(BenchmarkId::from_parameter(carts), &carts, |b, _| {
      b.to_async(&rt).iter(|| async { store.all().await.expect("all") });
    });
  }
  group.finish();
}

fn bench_filter_by_product_name(c: &mut Criterion) {
  let rt = Runtime::new().expect("runtime");
  let mut group = c.benchmark_group("memory_store_filter_by_product_name");
  for carts in [10, 100, 1_000] {
    let store = seeded_store(&rt, carts, 4);
    group.throughput(Throughput::Elements(carts as u64));
    group.bench_with_input(BenchmarkId::from_parameter(carts), &carts, |b, _| {
      b.to_async(&rt)
        .iter(|| async { store.filter_by_product_name("Milk").await.expect("filter") });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_list_all, bench_filter_by_product_name);
criterion_main!(benches);
